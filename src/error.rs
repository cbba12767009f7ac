// HTTP API error types
use axum::response::IntoResponse;
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::response::envelope;
use crate::store::StoreError;

/// Request-terminal errors, tagged by who caused them. Validation and
/// authorization errors terminate the request before any store traffic;
/// storage errors are terminal once reported. Every variant produces
/// exactly one response.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request - malformed or unparseable request body
    #[error("{0}")]
    Validation(String),

    // 401 Unauthorized - identity claim absent or malformed
    #[error("{0}")]
    Unauthorized(String),

    // 500 Internal Server Error - the persistence call rejected
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Storage(_) => 500,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Client-facing body. Storage detail never leaks: the body is exactly
    /// `{"status": false}` and the real error goes to the log.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Storage(_) => json!({ "status": false }),
            _ => json!({
                "status": false,
                "error": self.to_string(),
                "code": self.error_code(),
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Storage(err) = &self {
            tracing::error!("store call rejected: {}", err);
        }
        let status = axum::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        envelope(status, self.to_json())
    }
}
