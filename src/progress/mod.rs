//! Aggregates behind the progress charts: weight progression, daily volume,
//! exercise frequency and headline numbers over the trailing 30 days.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{Exercise, WorkoutSet},
    workout::local_date,
};

pub const REPORT_WINDOW_DAYS: i64 = 30;
pub const VOLUME_DAYS_SHOWN: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Heaviest actual weight per day for one exercise, oldest day first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgression {
    pub exercise: Exercise,
    pub points: Vec<DailyValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseAmount {
    pub exercise: Exercise,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyVolume {
    pub date: NaiveDate,
    /// One entry per exercise, in [`Exercise::ALL`] order.
    pub volumes: Vec<ExerciseAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseFrequency {
    pub exercise: Exercise,
    pub sessions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStats {
    /// Max actual weight per exercise, 0 when the exercise was not trained.
    pub max_weights: Vec<ExerciseAmount>,
    pub total_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub window_start: DateTime<Utc>,
    pub set_count: usize,
    pub weight_progression: Vec<ExerciseProgression>,
    pub daily_volume: Vec<DailyVolume>,
    pub frequency: Vec<ExerciseFrequency>,
    pub quick_stats: QuickStats,
}

impl ProgressReport {
    pub fn build(sets: &[WorkoutSet], now: DateTime<Utc>) -> Self {
        let window_start = now - Duration::days(REPORT_WINDOW_DAYS);
        let recent: Vec<&WorkoutSet> = sets
            .iter()
            .filter(|set| set.timestamp >= window_start)
            .collect();

        Self {
            window_start,
            set_count: recent.len(),
            weight_progression: weight_progression(&recent),
            daily_volume: daily_volume(&recent),
            frequency: frequency(&recent),
            quick_stats: quick_stats(&recent),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.set_count == 0
    }
}

fn weight_progression(recent: &[&WorkoutSet]) -> Vec<ExerciseProgression> {
    Exercise::ALL
        .iter()
        .filter_map(|&exercise| {
            let mut daily_max: BTreeMap<NaiveDate, f64> = BTreeMap::new();
            for set in recent.iter().filter(|set| set.exercise == exercise) {
                let best = daily_max
                    .entry(local_date(&set.timestamp))
                    .or_insert(set.actual_weight);
                *best = best.max(set.actual_weight);
            }
            if daily_max.is_empty() {
                return None;
            }
            Some(ExerciseProgression {
                exercise,
                points: daily_max
                    .into_iter()
                    .map(|(date, value)| DailyValue { date, value })
                    .collect(),
            })
        })
        .collect()
}

fn daily_volume(recent: &[&WorkoutSet]) -> Vec<DailyVolume> {
    let mut per_day: BTreeMap<NaiveDate, BTreeMap<Exercise, f64>> = BTreeMap::new();
    for set in recent {
        *per_day
            .entry(local_date(&set.timestamp))
            .or_default()
            .entry(set.exercise)
            .or_default() += set.volume();
    }

    let skip = per_day.len().saturating_sub(VOLUME_DAYS_SHOWN);
    per_day
        .into_iter()
        .skip(skip)
        .map(|(date, totals)| DailyVolume {
            date,
            volumes: Exercise::ALL
                .iter()
                .map(|exercise| ExerciseAmount {
                    exercise: *exercise,
                    amount: totals.get(exercise).copied().unwrap_or(0.0).round(),
                })
                .collect(),
        })
        .collect()
}

fn frequency(recent: &[&WorkoutSet]) -> Vec<ExerciseFrequency> {
    Exercise::ALL
        .iter()
        .map(|&exercise| ExerciseFrequency {
            exercise,
            sessions: recent.iter().filter(|set| set.exercise == exercise).count(),
        })
        .collect()
}

fn quick_stats(recent: &[&WorkoutSet]) -> QuickStats {
    let max_weights = Exercise::ALL
        .iter()
        .map(|&exercise| ExerciseAmount {
            exercise,
            amount: recent
                .iter()
                .filter(|set| set.exercise == exercise)
                .map(|set| set.actual_weight)
                .fold(0.0, f64::max),
        })
        .collect();

    QuickStats {
        max_weights,
        total_volume: recent.iter().map(|set| set.volume()).sum::<f64>().round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn set(exercise: Exercise, at: DateTime<Utc>, series: u32, reps: u32, kg: f64) -> WorkoutSet {
        let mut set = WorkoutSet::new_at(at);
        set.exercise = exercise;
        set.series = series;
        set.actual_reps = reps;
        set.actual_weight = kg;
        set
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_window_yields_empty_report() {
        let old = set(Exercise::Sentadillas, now() - Duration::days(45), 3, 5, 100.0);
        let report = ProgressReport::build(&[old], now());
        assert!(report.is_empty());
        assert!(report.weight_progression.is_empty());
        assert!(report.daily_volume.is_empty());
        assert_eq!(report.quick_stats.total_volume, 0.0);
        assert!(report.frequency.iter().all(|f| f.sessions == 0));
    }

    #[test]
    fn progression_takes_daily_maximum() {
        let day_one = now() - Duration::days(2);
        let day_two = now() - Duration::days(1);
        let sets = vec![
            set(Exercise::Sentadillas, day_one, 3, 5, 90.0),
            set(Exercise::Sentadillas, day_one + Duration::minutes(10), 3, 5, 95.0),
            set(Exercise::Sentadillas, day_two, 3, 5, 92.5),
            set(Exercise::PressDeBanca, day_two, 4, 8, 60.0),
        ];
        let report = ProgressReport::build(&sets, now());

        assert_eq!(report.weight_progression.len(), 2);
        let squats = &report.weight_progression[0];
        assert_eq!(squats.exercise, Exercise::Sentadillas);
        let values: Vec<f64> = squats.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![95.0, 92.5]);
        assert!(squats.points[0].date < squats.points[1].date);
        assert_eq!(report.weight_progression[1].exercise, Exercise::PressDeBanca);
    }

    #[test]
    fn volume_keeps_last_seven_days() {
        let sets: Vec<WorkoutSet> = (0..10)
            .map(|days_ago| {
                set(
                    Exercise::PesoMuerto,
                    now() - Duration::days(days_ago),
                    2,
                    5,
                    100.0,
                )
            })
            .collect();
        let report = ProgressReport::build(&sets, now());

        assert_eq!(report.daily_volume.len(), VOLUME_DAYS_SHOWN);
        let newest = report.daily_volume.last().unwrap();
        assert_eq!(newest.date, local_date(&now()));
        let deadlift = newest
            .volumes
            .iter()
            .find(|v| v.exercise == Exercise::PesoMuerto)
            .unwrap();
        assert_eq!(deadlift.amount, 1000.0);
        assert_eq!(newest.volumes.len(), Exercise::ALL.len());
    }

    #[test]
    fn frequency_and_quick_stats() {
        let at = now() - Duration::days(1);
        let sets = vec![
            set(Exercise::Sentadillas, at, 5, 5, 100.0),
            set(Exercise::Sentadillas, at, 3, 3, 110.0),
            set(Exercise::PesoMuerto, at, 1, 1, 140.5),
        ];
        let report = ProgressReport::build(&sets, now());

        let counts: Vec<usize> = report.frequency.iter().map(|f| f.sessions).collect();
        assert_eq!(counts, vec![2, 1, 0]);

        let maxes: Vec<f64> = report
            .quick_stats
            .max_weights
            .iter()
            .map(|m| m.amount)
            .collect();
        assert_eq!(maxes, vec![110.0, 140.5, 0.0]);
        // 2500 + 990 + 140.5, rounded
        assert_eq!(report.quick_stats.total_volume, 3631.0);
    }
}
