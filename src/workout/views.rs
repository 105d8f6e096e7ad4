//! Derived views over the workout log: today's sets and the dated history.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutSet;

/// Sets sharing one local calendar date, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayGroup {
    pub date: NaiveDate,
    pub sets: Vec<WorkoutSet>,
}

pub fn local_date(timestamp: &DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Sets logged on `today`, in log order.
pub fn today_sets(sets: &[WorkoutSet], today: NaiveDate) -> Vec<WorkoutSet> {
    sets.iter()
        .filter(|set| local_date(&set.timestamp) == today)
        .cloned()
        .collect()
}

/// Every set not logged on `today`, sorted newest first and grouped by date.
pub fn historical_sets(sets: &[WorkoutSet], today: NaiveDate) -> Vec<DayGroup> {
    let mut past: Vec<WorkoutSet> = sets
        .iter()
        .filter(|set| local_date(&set.timestamp) != today)
        .cloned()
        .collect();
    // Stable, so sets with identical timestamps keep log order.
    past.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut groups: Vec<DayGroup> = Vec::new();
    for set in past {
        let date = local_date(&set.timestamp);
        match groups.last_mut() {
            Some(group) if group.date == date => group.sets.push(set),
            _ => groups.push(DayGroup {
                date,
                sets: vec![set],
            }),
        }
    }
    groups
}
