use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use budgetly_core::state::State as BudgetState;

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn get_state(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<BudgetState>> {
    let snapshot = state.state_service.compute_state(&user_id).await?;
    Ok(Json(snapshot))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/state", get(get_state))
}
