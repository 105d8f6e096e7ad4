pub mod commands;
pub mod views;
pub mod workout_log;

pub use views::{historical_sets, local_date, today_sets, DayGroup};
pub use workout_log::WorkoutLog;
