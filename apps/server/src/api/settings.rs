use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use budgetly_core::settings::{SettingsUpdate, UserSettings};

use super::ApiJson;
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn get_settings(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<UserSettings>> {
    let settings = state.settings_service.get_settings(&user_id).await?;
    Ok(Json(settings))
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(update): ApiJson<SettingsUpdate>,
) -> ApiResult<Json<UserSettings>> {
    let settings = state
        .settings_service
        .update_settings(&user_id, &update)
        .await?;
    Ok(Json(settings))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
