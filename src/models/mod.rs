pub mod chat_message;
pub mod workout_set;

pub use chat_message::{ChatMessage, Sender};
pub use workout_set::{Exercise, SetUpdate, WorkoutSet};
