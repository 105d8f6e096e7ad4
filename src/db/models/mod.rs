pub mod video;

pub use video::{VideoRecord, VideoSummary, DEFAULT_VIDEO_MIME};
