use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use budgetly_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidBody(String),
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    kind: &'static str,
    message: String,
}

impl ApiError {
    /// Maps a rejected record body. Bodies that parse as JSON but do not fit
    /// the record shape (bad amounts, wrong field types) are invalid records.
    pub fn from_record_rejection(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                ApiError::Core(CoreError::InvalidRecord(e.body_text()))
            }
            other => other.into(),
        }
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Core(e) => {
                let status = match e {
                    CoreError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
                    CoreError::InvalidRecord(_) | CoreError::Validation(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    CoreError::MissingConfiguration(_) => StatusCode::CONFLICT,
                    CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
                    CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.kind())
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::InvalidBody(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!(kind, "{}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            kind,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
