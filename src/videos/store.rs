use anyhow::{bail, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    confirmation::{Decision, DestructiveAction, Pending},
    db::{Database, VideoRecord, VideoSummary, DEFAULT_VIDEO_MIME},
    log_info,
};

const ENABLE_LOGS: bool = true;

/// Recorded practice clips keyed by id. No size limits or cleanup policy.
#[derive(Clone)]
pub struct VideoStore {
    db: Database,
}

impl VideoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores `blob` under `video_id`, replacing an existing clip with that id.
    pub async fn save(&self, video_id: &str, blob: Vec<u8>) -> Result<VideoRecord> {
        let record = VideoRecord {
            id: video_id.to_string(),
            size_bytes: blob.len() as u64,
            blob,
            mime_type: DEFAULT_VIDEO_MIME.to_string(),
            created_at: Utc::now(),
        };
        self.db.put_video(&record).await?;
        log_info!("Saved video {} ({} bytes)", record.id, record.size_bytes);
        Ok(record)
    }

    /// Joins the chunks a recorder produced into one clip under a fresh id.
    pub async fn save_recording(&self, chunks: Vec<Vec<u8>>) -> Result<VideoRecord> {
        let blob: Vec<u8> = chunks.into_iter().flatten().collect();
        if blob.is_empty() {
            bail!("nothing was recorded");
        }
        let video_id = Uuid::new_v4().to_string();
        self.save(&video_id, blob).await
    }

    pub async fn get(&self, video_id: &str) -> Result<Option<VideoRecord>> {
        self.db.get_video(video_id).await
    }

    pub async fn list(&self) -> Result<Vec<VideoRecord>> {
        self.db.list_videos().await
    }

    pub async fn list_summaries(&self) -> Result<Vec<VideoSummary>> {
        self.db.list_video_summaries().await
    }

    /// Returns whether a clip was removed; an unknown id is a no-op.
    pub async fn delete(&self, video_id: &str) -> Result<bool> {
        let removed = self.db.delete_video(video_id).await?;
        if removed {
            log_info!("Deleted video {video_id}");
        }
        Ok(removed)
    }

    pub fn request_delete(&self, video_id: &str) -> Pending {
        Pending::new(DestructiveAction::DeleteVideo {
            video_id: video_id.to_string(),
        })
    }

    pub async fn resolve_delete(&self, pending: Pending, decision: Decision) -> Result<bool> {
        let DestructiveAction::DeleteVideo { video_id } = pending.into_action() else {
            bail!("pending action is not a video deletion");
        };
        if !decision.is_confirmed() {
            return Ok(false);
        }
        self.delete(&video_id).await
    }

    pub async fn contains(&self, video_id: &str) -> Result<bool> {
        self.db.video_exists(video_id).await
    }
}
