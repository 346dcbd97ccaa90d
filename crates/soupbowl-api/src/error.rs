//! SoupBowl — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use soupbowl_core::error::DomainError;
use soupbowl_library::LibraryError;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Readings or tasks could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] LibraryError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A domain operation failed.
    Domain(DomainError),
    /// Missing or wrong `X-Admin-Password`.
    Unauthorized,
    /// The caller's session has not reached the readings yet.
    ReadingsLocked,
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

fn classify(err: &DomainError) -> (StatusCode, &'static str) {
    match err {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        DomainError::DuplicateSlug(_) => (StatusCode::CONFLICT, "duplicate_slug"),
        DomainError::TerminalState(_) => (StatusCode::BAD_REQUEST, "terminal_state"),
        DomainError::InvalidTransition(_) => (StatusCode::BAD_REQUEST, "invalid_transition"),
        DomainError::IncompleteFields { .. } => (StatusCode::BAD_REQUEST, "incomplete_fields"),
        DomainError::WrongStatus { .. } => (StatusCode::BAD_REQUEST, "wrong_status"),
        DomainError::PublishedEntry(_) => (StatusCode::BAD_REQUEST, "published_entry"),
        DomainError::PhaseTooEarly { .. } => (StatusCode::BAD_REQUEST, "phase_too_early"),
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::Infrastructure(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Domain(err) => {
                let (status, code) = classify(&err);
                if status.is_server_error() {
                    tracing::error!(error = %err, "request failed");
                }
                (status, code, err.to_string())
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "invalid admin password".to_owned(),
            ),
            ApiError::ReadingsLocked => (
                StatusCode::FORBIDDEN,
                "readings_locked",
                "readings are locked until the fork is reached".to_owned(),
            ),
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}
