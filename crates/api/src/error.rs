//! Application-level error type for HTTP handlers.
//!
//! Every failure is converted here, at the handler boundary, into a JSON
//! body plus status code; nothing propagates as an unhandled fault. The
//! caller-facing messages are localized (Russian), matching what the bot
//! frontend displays. Delete-key validation failures use an `"error"`
//! body key instead of `"message"`; that asymmetry is part of the wire
//! contract.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use runlens_tracker::TrackerError;

/// Localized caller-facing messages.
pub const MSG_KEY_EMPTY: &str = "API ключ не может быть пустым";
pub const MSG_KEY_REQUIRED: &str = "API ключ обязателен";
pub const MSG_KEY_EXISTS: &str = "Этот API ключ уже существует";
pub const MSG_KEY_INVALID: &str = "Неверный API ключ";
pub const MSG_KEY_NOT_FOUND: &str = "API ключ не найден";

/// Errors returned by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Empty `api_key` on add-key.
    #[error("api_key is empty")]
    EmptyApiKey,

    /// Empty `api_key` on delete-key.
    #[error("api_key is required")]
    ApiKeyRequired,

    /// The `(telegram_id, api_key)` pair is already stored.
    #[error("credential already stored")]
    DuplicateKey,

    /// The tracking service rejected the supplied key.
    #[error("invalid credential")]
    InvalidApiKey,

    /// No stored row matched the delete request.
    #[error("stored key not found")]
    KeyNotFound,

    /// A database error from sqlx. The driver message is surfaced
    /// verbatim, as callers expect for connectivity failures.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A non-credential failure from the tracking service.
    #[error("Tracker error: {0}")]
    Tracker(TrackerError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidCredential => AppError::InvalidApiKey,
            other => AppError::Tracker(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body_key, message) = match &self {
            AppError::EmptyApiKey => {
                (StatusCode::BAD_REQUEST, "message", MSG_KEY_EMPTY.to_string())
            }
            AppError::ApiKeyRequired => (
                StatusCode::BAD_REQUEST,
                "error",
                MSG_KEY_REQUIRED.to_string(),
            ),
            AppError::DuplicateKey => {
                (StatusCode::CONFLICT, "message", MSG_KEY_EXISTS.to_string())
            }
            AppError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                "message",
                MSG_KEY_INVALID.to_string(),
            ),
            AppError::KeyNotFound => (
                StatusCode::NOT_FOUND,
                "error",
                MSG_KEY_NOT_FOUND.to_string(),
            ),
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "message",
                    err.to_string(),
                )
            }
            AppError::Tracker(err) => {
                tracing::error!(error = %err, "Tracking service error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "message",
                    err.to_string(),
                )
            }
        };

        let body = json!({ body_key: message });
        (status, axum::Json(body)).into_response()
    }
}
