use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use budgetly_core::budget_rules::{BucketComparison, BudgetRule, BudgetRuleUpdate};

use super::ApiJson;
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn get_budget_rule(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<BudgetRule>> {
    let rule = state.budget_rule_service.get_budget_rule(&user_id).await?;
    Ok(Json(rule))
}

async fn update_budget_rule(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    ApiJson(update): ApiJson<BudgetRuleUpdate>,
) -> ApiResult<Json<BudgetRule>> {
    let rule = state
        .budget_rule_service
        .update_targets(&user_id, update)
        .await?;
    Ok(Json(rule))
}

/// Target vs actual per bucket, from a fresh (or cached) state.
async fn get_allocations(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
) -> ApiResult<Json<Vec<BucketComparison>>> {
    let snapshot = state.state_service.compute_state(&user_id).await?;
    Ok(Json(snapshot.allocations))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/budget-rule", get(get_budget_rule).put(update_budget_rule))
        .route("/budget-rule/allocations", get(get_allocations))
}
