use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use budgetly_core::records::{FinancialRecord, NewRecord, RecordKind, RecordUpdate};

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

fn collection(name: &str) -> ApiResult<RecordKind> {
    RecordKind::from_collection_name(name)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown collection '{}'", name)))
}

async fn list_records(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<FinancialRecord>>> {
    let kind = collection(&name)?;
    let records = state.record_service.list_records(&user_id, kind)?;
    Ok(Json(records))
}

async fn create_record(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path(name): Path<String>,
    payload: Result<Json<NewRecord>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FinancialRecord>)> {
    let Json(new_record) = payload.map_err(ApiError::from_record_rejection)?;
    let kind = collection(&name)?;
    let record = state
        .record_service
        .create_record(&user_id, kind, new_record)
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_record(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path((name, id)): Path<(String, String)>,
) -> ApiResult<Json<FinancialRecord>> {
    let kind = collection(&name)?;
    let record = state.record_service.get_record(&user_id, kind, &id)?;
    Ok(Json(record))
}

async fn update_record(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path((name, id)): Path<(String, String)>,
    payload: Result<Json<RecordUpdate>, JsonRejection>,
) -> ApiResult<Json<FinancialRecord>> {
    let Json(update) = payload.map_err(ApiError::from_record_rejection)?;
    let kind = collection(&name)?;
    let record = state
        .record_service
        .update_record(&user_id, kind, &id, update)
        .await?;
    Ok(Json(record))
}

async fn delete_record(
    State(state): State<Arc<AppState>>,
    CurrentUser(user_id): CurrentUser,
    Path((name, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let kind = collection(&name)?;
    state.record_service.delete_record(&user_id, kind, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{collection}", get(list_records).post(create_record))
        .route(
            "/{collection}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
}
