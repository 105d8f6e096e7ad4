mod connection;
mod helpers;
mod migrations;
pub mod models;
mod repositories;

pub use connection::Database;
pub use models::{VideoRecord, VideoSummary, DEFAULT_VIDEO_MIME};
