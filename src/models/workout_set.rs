//! Workout set records.
//!
//! Stored as camelCase JSON (`targetReps`, `actualWeight`, ...) inside the
//! `workout-sets` snapshot.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Exercise {
    #[serde(rename = "sentadillas")]
    Sentadillas,
    #[serde(rename = "peso muerto")]
    PesoMuerto,
    #[serde(rename = "press de banca")]
    PressDeBanca,
}

impl Exercise {
    pub const ALL: [Exercise; 3] = [
        Exercise::Sentadillas,
        Exercise::PesoMuerto,
        Exercise::PressDeBanca,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Exercise::Sentadillas => "sentadillas",
            Exercise::PesoMuerto => "peso muerto",
            Exercise::PressDeBanca => "press de banca",
        }
    }

    /// Capitalized label shown in pickers and chart legends.
    pub fn display_name(&self) -> &'static str {
        match self {
            Exercise::Sentadillas => "Sentadillas",
            Exercise::PesoMuerto => "Peso muerto",
            Exercise::PressDeBanca => "Press de banca",
        }
    }
}

impl Default for Exercise {
    fn default() -> Self {
        Exercise::Sentadillas
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged unit of a single exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub id: String,
    pub exercise: Exercise,
    pub series: u32,
    pub target_reps: u32,
    pub actual_reps: u32,
    /// Kilograms.
    pub target_weight: f64,
    /// Kilograms.
    pub actual_weight: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutSet {
    /// A blank set as created by "add set": one series of five planned reps.
    pub fn new_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            exercise: Exercise::default(),
            series: 1,
            target_reps: 5,
            actual_reps: 0,
            target_weight: 0.0,
            actual_weight: 0.0,
            timestamp,
            notes: None,
        }
    }

    /// `series × actualReps × actualWeight`.
    pub fn volume(&self) -> f64 {
        f64::from(self.series) * f64::from(self.actual_reps) * self.actual_weight
    }

    pub fn apply(&mut self, update: SetUpdate) {
        match update {
            SetUpdate::Exercise(exercise) => self.exercise = exercise,
            SetUpdate::Series(series) => self.series = series,
            SetUpdate::TargetReps(reps) => self.target_reps = reps,
            SetUpdate::ActualReps(reps) => self.actual_reps = reps,
            SetUpdate::TargetWeight(weight) => self.target_weight = weight,
            SetUpdate::ActualWeight(weight) => self.actual_weight = weight,
            SetUpdate::Notes(notes) => self.notes = notes,
            SetUpdate::Timestamp(timestamp) => self.timestamp = timestamp,
        }
    }
}

/// A single-field edit of a [`WorkoutSet`]. The id is not editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SetUpdate {
    Exercise(Exercise),
    Series(u32),
    TargetReps(u32),
    ActualReps(u32),
    TargetWeight(f64),
    ActualWeight(f64),
    Notes(Option<String>),
    Timestamp(DateTime<Utc>),
}
