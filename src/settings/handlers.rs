use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::ApiError,
    extract::ApiJson,
    nutrition::MacroGoalSettings,
    settings::{dto::UpdateSettingsRequest, services::merge_settings},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .route("/reset", post(reset_settings))
}

#[instrument(skip(state))]
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<MacroGoalSettings>, ApiError> {
    Ok(Json(state.store.settings().await?))
}

#[instrument(skip(state, payload))]
pub async fn update_settings(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateSettingsRequest>,
) -> Result<Json<MacroGoalSettings>, ApiError> {
    let _guard = state.write_lock.lock().await;
    let current = state.store.settings().await?;
    let updated = merge_settings(&current, payload)?;
    state.store.save_settings(&updated).await?;

    info!(goal = updated.daily_calorie_goal, "settings updated");
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn reset_settings(State(state): State<AppState>) -> Result<Json<MacroGoalSettings>, ApiError> {
    let defaults = MacroGoalSettings::default();
    let _guard = state.write_lock.lock().await;
    state.store.save_settings(&defaults).await?;

    info!("settings reset to defaults");
    Ok(Json(defaults))
}
