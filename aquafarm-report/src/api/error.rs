//! API error responses
//!
//! All handlers report failures as JSON `{"error": ...}` bodies with the
//! matching status code. Database failures pass through unmodified.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request parameter (unknown chart parameter, bad sort column)
    BadRequest(String),
    /// Referenced entity does not exist
    NotFound(String),
    /// Underlying database failure
    DatabaseError(String),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::DatabaseError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::DatabaseError(msg) => {
                error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
