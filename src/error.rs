//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`ServiceError`] as the error type.
//! Analysis itself never fails: model errors are absorbed by the keyword fallback, so these
//! errors surface from model loading, request parsing and the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`ServiceError`] as the error type.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// The unified error type for all crate errors.
///
/// # Example
///
/// ```rust
/// use sentiment_service::error::ServiceError;
///
/// fn handle_error(e: ServiceError) {
///     match &e {
///         ServiceError::ModelNotFound(_) | ServiceError::ModelFormat(_) => {
///             // Keep serving with the keyword heuristic
///         }
///         ServiceError::InvalidInput(_) => {
///             // Bad request - fix and retry
///         }
///         _ => {
///             eprintln!("Internal error: {e}");
///         }
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ServiceError {
    /// Model weights file is missing.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Model weights exist but do not have the expected layout.
    #[error("Invalid model format: {0}")]
    ModelFormat(String),

    /// Inference call failed or returned a malformed output.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Device initialization failure.
    #[error("Device error: {0}")]
    Device(String),

    /// Malformed client input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),

    /// Pass-through from the tensor runtime.
    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    /// Pass-through from filesystem access.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tokio::task::JoinError> for ServiceError {
    fn from(value: tokio::task::JoinError) -> Self {
        ServiceError::Unexpected(format!("Analysis task failed: {value}"))
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
