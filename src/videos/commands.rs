use crate::{
    confirmation::{Decision, Pending},
    db::{VideoRecord, VideoSummary},
    utils::user_notice,
    AppState,
};

/// Saves a finished recording and returns the new clip's id.
pub async fn save_recording(state: &AppState, chunks: Vec<Vec<u8>>) -> Result<String, String> {
    state
        .videos
        .save_recording(chunks)
        .await
        .map(|record| record.id)
        .map_err(user_notice("Error al guardar el video"))
}

pub async fn list_videos(state: &AppState) -> Result<Vec<VideoSummary>, String> {
    state
        .videos
        .list_summaries()
        .await
        .map_err(user_notice("Error al cargar los videos"))
}

pub async fn get_video(state: &AppState, video_id: String) -> Result<Option<VideoRecord>, String> {
    state
        .videos
        .get(&video_id)
        .await
        .map_err(user_notice("Error al cargar el video"))
}

pub async fn request_video_deletion(state: &AppState, video_id: String) -> Result<Pending, String> {
    Ok(state.videos.request_delete(&video_id))
}

pub async fn resolve_video_deletion(
    state: &AppState,
    pending: Pending,
    decision: Decision,
) -> Result<bool, String> {
    state
        .videos
        .resolve_delete(pending, decision)
        .await
        .map_err(user_notice("Error al eliminar el video"))
}
