use chrono::Utc;

use crate::{
    confirmation::{Decision, Pending},
    models::{SetUpdate, WorkoutSet},
    progress::ProgressReport,
    sample_data::SampleDataConfig,
    utils::user_notice,
    workout::DayGroup,
    AppState,
};

pub async fn list_sets(state: &AppState) -> Result<Vec<WorkoutSet>, String> {
    Ok(state.workouts.lock().await.sets().to_vec())
}

pub async fn get_today_sets(state: &AppState) -> Result<Vec<WorkoutSet>, String> {
    Ok(state.workouts.lock().await.today_sets())
}

pub async fn get_history(state: &AppState) -> Result<Vec<DayGroup>, String> {
    Ok(state.workouts.lock().await.historical_sets())
}

pub async fn add_set(state: &AppState) -> Result<WorkoutSet, String> {
    state
        .workouts
        .lock()
        .await
        .add()
        .await
        .map_err(user_notice("No se pudo guardar el set"))
}

pub async fn update_set(
    state: &AppState,
    set_id: String,
    update: SetUpdate,
) -> Result<bool, String> {
    state
        .workouts
        .lock()
        .await
        .update(&set_id, update)
        .await
        .map_err(user_notice("No se pudo actualizar el set"))
}

pub async fn request_set_deletion(state: &AppState, set_id: String) -> Result<Pending, String> {
    Ok(state.workouts.lock().await.request_delete(&set_id))
}

pub async fn resolve_set_deletion(
    state: &AppState,
    pending: Pending,
    decision: Decision,
) -> Result<Option<WorkoutSet>, String> {
    state
        .workouts
        .lock()
        .await
        .resolve_delete(pending, decision)
        .await
        .map_err(user_notice("No se pudo eliminar el set"))
}

pub async fn request_sample_reset(state: &AppState) -> Result<Pending, String> {
    Ok(state.workouts.lock().await.request_reset())
}

/// Returns the number of sets in the log afterwards.
pub async fn resolve_sample_reset(
    state: &AppState,
    pending: Pending,
    decision: Decision,
) -> Result<usize, String> {
    let mut log = state.workouts.lock().await;
    log.resolve_reset(pending, decision, &SampleDataConfig::default())
        .await
        .map_err(user_notice("No se pudieron cargar los datos de ejemplo"))?;
    Ok(log.len())
}

pub async fn get_progress_report(state: &AppState) -> Result<ProgressReport, String> {
    let log = state.workouts.lock().await;
    Ok(ProgressReport::build(log.sets(), Utc::now()))
}
