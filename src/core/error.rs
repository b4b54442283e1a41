use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Schema check failed after the presence check passed. Reported as a
    /// server error with a generic body; the details only reach the log.
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Unique index rejected the email. Reported as a server error, the same
    /// way any other storage failure is.
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_SERVER_ERROR),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            AppError::Validation(ref details) => {
                tracing::warn!("Registration failed validation: {}", details.join("; "));
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_SERVER_ERROR),
                )
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_SERVER_ERROR),
                )
            }
            AppError::DuplicateEmail(ref email) => {
                tracing::warn!("Registration rejected, email already registered: {}", email);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_SERVER_ERROR),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
