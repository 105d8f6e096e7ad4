use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, to_i64, to_u64},
    models::{VideoRecord, VideoSummary},
};

fn row_to_video(row: &Row) -> Result<VideoRecord> {
    let created_at: String = row.get("created_at")?;
    let size_bytes: i64 = row.get("size_bytes")?;

    Ok(VideoRecord {
        id: row.get("id")?,
        blob: row.get("blob")?,
        mime_type: row.get("mime_type")?,
        size_bytes: to_u64(size_bytes, "size_bytes")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

fn row_to_summary(row: &Row) -> Result<VideoSummary> {
    let created_at: String = row.get("created_at")?;
    let size_bytes: i64 = row.get("size_bytes")?;

    Ok(VideoSummary {
        id: row.get("id")?,
        mime_type: row.get("mime_type")?,
        size_bytes: to_u64(size_bytes, "size_bytes")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Insert the clip, replacing any clip already stored under the same id.
    pub async fn put_video(&self, video: &VideoRecord) -> Result<()> {
        let record = video.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO videos (id, blob, mime_type, size_bytes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                     blob = excluded.blob,
                     mime_type = excluded.mime_type,
                     size_bytes = excluded.size_bytes,
                     created_at = excluded.created_at",
                params![
                    record.id,
                    record.blob,
                    record.mime_type,
                    to_i64(record.size_bytes)?,
                    record.created_at.to_rfc3339(),
                ],
            )
            .with_context(|| format!("failed to store video {}", record.id))?;
            Ok(())
        })
        .await
    }

    pub async fn get_video(&self, video_id: &str) -> Result<Option<VideoRecord>> {
        let video_id = video_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, blob, mime_type, size_bytes, created_at
                 FROM videos
                 WHERE id = ?1",
            )?;
            let mut rows = stmt.query(params![video_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_video(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// All clips, oldest first.
    pub async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, blob, mime_type, size_bytes, created_at
                 FROM videos
                 ORDER BY created_at ASC, id ASC",
            )?;
            let mut rows = stmt.query([])?;
            let mut videos = Vec::new();
            while let Some(row) = rows.next()? {
                videos.push(row_to_video(row)?);
            }
            Ok(videos)
        })
        .await
    }

    pub async fn list_video_summaries(&self) -> Result<Vec<VideoSummary>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, mime_type, size_bytes, created_at
                 FROM videos
                 ORDER BY created_at ASC, id ASC",
            )?;
            let mut rows = stmt.query([])?;
            let mut summaries = Vec::new();
            while let Some(row) = rows.next()? {
                summaries.push(row_to_summary(row)?);
            }
            Ok(summaries)
        })
        .await
    }

    /// Returns whether a clip was removed.
    pub async fn delete_video(&self, video_id: &str) -> Result<bool> {
        let video_id = video_id.to_string();
        self.execute(move |conn| {
            let rows = conn
                .execute("DELETE FROM videos WHERE id = ?1", params![video_id])
                .with_context(|| format!("failed to delete video {video_id}"))?;
            Ok(rows > 0)
        })
        .await
    }

    pub async fn video_exists(&self, video_id: &str) -> Result<bool> {
        let video_id = video_id.to_string();
        self.execute(move |conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM videos WHERE id = ?1",
                    params![video_id],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
        .await
    }
}
