use crate::models::Exercise;

/// Shape of the synthetic history used for demos and empty states.
#[derive(Debug, Clone)]
pub struct SampleDataConfig {
    /// Trailing window length, today included.
    pub days: u32,

    /// Chance that a given day has any training at all.
    pub training_day_probability: f64,

    /// Inclusive range of entries on a training day.
    pub min_entries_per_day: u32,
    pub max_entries_per_day: u32,

    /// Kilograms added per elapsed day of the window.
    pub progression_per_day: f64,

    /// Half-width of the uniform noise on the target weight.
    pub target_weight_jitter: f64,
    /// Half-width of the extra noise separating actual from target weight.
    pub actual_weight_jitter: f64,

    pub min_series: u32,
    pub max_series: u32,
    pub min_target_reps: u32,
    pub max_target_reps: u32,

    pub note_probability: f64,
    pub note_text: &'static str,
}

impl SampleDataConfig {
    pub fn base_weight(&self, exercise: Exercise) -> f64 {
        match exercise {
            Exercise::Sentadillas => 80.0,
            Exercise::PesoMuerto => 100.0,
            Exercise::PressDeBanca => 60.0,
        }
    }
}

impl Default for SampleDataConfig {
    fn default() -> Self {
        Self {
            days: 30,
            training_day_probability: 0.7,
            min_entries_per_day: 1,
            max_entries_per_day: 3,
            progression_per_day: 0.5,
            target_weight_jitter: 5.0,
            actual_weight_jitter: 2.5,
            min_series: 3,
            max_series: 5,
            min_target_reps: 3,
            max_target_reps: 10,
            note_probability: 0.3,
            note_text: "Buena sesión",
        }
    }
}
