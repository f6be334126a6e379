//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Errors surfaced to HTTP callers.
///
/// The cache engine itself never fails; these describe a negative lookup or a
/// request rejected before it reaches the engine.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent or expired
    #[error("key not found: {0}")]
    NotFound(String),

    /// Missing key or value, or malformed ttl
    #[error("{0}")]
    InvalidArgument(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CacheError::NotFound(_) => (StatusCode::NOT_FOUND, "key not found".to_string()),
            CacheError::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
