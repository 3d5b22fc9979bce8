//! Error handling module.
//!
//! Unified error type for the service with HTTP status code mapping and the
//! `{ "error": ..., "code": ... }` response body.

pub mod codes;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use codes::ErrorCode;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Required request parameters missing or invalid.
    #[error("{0}")]
    MissingParams(String),

    /// No active parking session for the given ticket.
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    /// Entry could not be processed.
    #[error("Failed to process entry: {0}")]
    InvalidRequest(String),

    /// Ticket store error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingParams(_) => ErrorCode::MISSING_PARAMS,
            Self::TicketNotFound(_) => ErrorCode::TICKET_NOT_FOUND,
            Self::InvalidRequest(_) => ErrorCode::INVALID_REQUEST,
            Self::Storage(_) => ErrorCode::STORAGE_ERROR,
        }
    }

    /// Get the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingParams(_) => StatusCode::BAD_REQUEST,
            Self::TicketNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidRequest(_) | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = %code,
                status = %status,
                message = %message,
                "Request failed"
            );
        } else {
            tracing::warn!(
                error_code = %code,
                status = %status,
                message = %message,
                "Request rejected"
            );
        }

        let body = Json(json!({
            "error": message,
            "code": code.as_str(),
        }));

        (status, body).into_response()
    }
}

/// Storage-specific error type.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An entry with this key is already present.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias using `StorageError`.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
