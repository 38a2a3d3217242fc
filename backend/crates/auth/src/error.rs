//! Auth Error Types
//!
//! Auth-specific error variants that render through the unified
//! `kernel::error::AppError` problem-details response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password violates the length policy
    #[error("{0}")]
    WeakPassword(String),

    /// Session token failed any check (shape, signature, algorithm, claims)
    #[error("Session expired")]
    InvalidToken,

    /// Unknown email, wrong password or inactive account
    #[error("Invalid email or password")]
    InvalidCredential,

    #[error("First/last name must be 50 characters maximum")]
    InputTooLong,

    #[error("Invalid characters in input")]
    InvalidCharacters,

    #[error(
        "First/last names can only contain letters with single spaces or hyphens between parts"
    )]
    InvalidFormat,

    #[error("Invalid email address")]
    InvalidEmail,

    /// Origin header missing or not the configured origin
    #[error("Forbidden")]
    ForbiddenOrigin,

    #[error("Unsupported media type")]
    UnsupportedMediaType,

    #[error("This email address is already in use")]
    DuplicateEmail,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::WeakPassword(_)
            | AuthError::InputTooLong
            | AuthError::InvalidCharacters
            | AuthError::InvalidFormat
            | AuthError::InvalidEmail => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken | AuthError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AuthError::ForbiddenOrigin => StatusCode::FORBIDDEN,
            AuthError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AuthError::DuplicateEmail => StatusCode::CONFLICT,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::WeakPassword(_)
            | AuthError::InputTooLong
            | AuthError::InvalidCharacters
            | AuthError::InvalidFormat
            | AuthError::InvalidEmail => ErrorKind::BadRequest,
            AuthError::InvalidToken | AuthError::InvalidCredential => ErrorKind::Unauthorized,
            AuthError::ForbiddenOrigin => ErrorKind::Forbidden,
            AuthError::UnsupportedMediaType => ErrorKind::UnsupportedMediaType,
            AuthError::DuplicateEmail => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; the detail stays in the log.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("An unexpected error occurred")
            }
            AuthError::DuplicateEmail => AppError::conflict(self.to_string())
                .with_action("Sign in instead, or register with a different address"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredential => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::ForbiddenOrigin => {
                tracing::warn!("Request rejected: origin mismatch");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            // Pool exhaustion and I/O failures become 503 there
            AuthError::Database(e) => AppError::from(e).into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}

impl From<platform::password::PasswordPolicyError> for AuthError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        AuthError::WeakPassword(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Blocking task failed: {err}"))
    }
}
