pub mod config;
pub mod generator;

pub use config::SampleDataConfig;
pub use generator::{generate_sample_data, round_to_half};
