//! HTTP error responses
//!
//! Every failure reaching a handler ends up as `{"message", "timestamp"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Book Edition not found")]
    pub message: String,
    /// Seconds since the Unix epoch
    #[schema(example = 1752437901)]
    pub timestamp: i64,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A failure raised by a service
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Payload failed field-level validation
    #[error("{0}")]
    BadRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::AlreadyExists(_)
                | DomainError::Validation(_)
                | DomainError::Integrity(_) => StatusCode::BAD_REQUEST,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            ApiError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
