//! Error types for the best stories service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Story Error Enum ==
/// Unified error type for the best stories service.
#[derive(Error, Debug)]
pub enum StoryError {
    /// The cache stayed unpopulated for every permitted retry
    #[error("Exceeded max retry attempts {0}.")]
    ExceededRetryAttempts(u32),

    /// Transient failure talking to the upstream API
    #[error("Upstream fetch failed: {0}")]
    Fetch(String),

    /// Upstream returned no item for the id (deleted or dead story)
    #[error("Story not found upstream: {0}")]
    NotFound(u64),

    /// Work was interrupted by the cancellation token
    #[error("Operation cancelled")]
    Cancelled,

    /// Payload in the external store could not be decoded
    #[error("Malformed cache payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// External store round trip failed
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            StoryError::InvalidRequest(msg) => msg,
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the best stories service.
pub type Result<T> = std::result::Result<T, StoryError>;
