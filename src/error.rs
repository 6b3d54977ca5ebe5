//! Error types for the cafe API
//!
//! Every expected failure maps to a non-2xx status while keeping the JSON
//! payload shapes of the original service: id lookups answer with
//! `{"error": {"Not found": ..}}`, empty search results with
//! `{"error": {"Not Found": ..}}` (note the casing), and a rejected api-key
//! with a bare `{"error": ".."}` string.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No row matches the given id
    #[error("Not found: {0}")]
    NotFound(String),

    /// No rows match a search filter (legacy "Not Found" payload casing)
    #[error("No match: {0}")]
    NoMatch(String),

    /// api-key missing or rejected
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Duplicate cafe name
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, json!({"error": {"Not found": msg}}))
            }
            ApiError::NoMatch(msg) => {
                (StatusCode::NOT_FOUND, json!({"error": {"Not Found": msg}}))
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, json!({"error": msg})),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({"error": msg})),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!({"error": msg})),
            ApiError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
