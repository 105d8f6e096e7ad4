//! Stored practice clips.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Container produced by the in-app recorder.
pub const DEFAULT_VIDEO_MIME: &str = "video/webm";

/// A recorded clip together with its bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub blob: Vec<u8>,
    pub mime_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

/// Listing entry that leaves the blob in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&VideoRecord> for VideoSummary {
    fn from(record: &VideoRecord) -> Self {
        Self {
            id: record.id.clone(),
            mime_type: record.mime_type.clone(),
            size_bytes: record.size_bytes,
            created_at: record.created_at,
        }
    }
}
