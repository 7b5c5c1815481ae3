//! Pot Error Types
//!
//! Domain error variants that integrate with the unified
//! `kernel::error::AppError` system at the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Pot-specific result type alias
pub type PotResult<T> = Result<T, PotError>;

/// Pot-specific error variants
#[derive(Debug, Error)]
pub enum PotError {
    /// No bearer token on a protected route
    #[error("Access denied, no token provided")]
    MissingToken,

    /// Token signature or expiry check failed
    #[error("Invalid token")]
    InvalidToken,

    /// Token subject (or referenced user) no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Referenced record absent
    #[error("Record not found")]
    NotFound,

    /// Role check failed
    #[error("Access denied, admin privileges required")]
    Forbidden,

    /// Login failure; deliberately identical for unknown email and wrong
    /// password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Unknown role string on a role update
    #[error("Unknown role: {0}")]
    InvalidRole(String),

    /// Fixed-window rate limit exceeded
    #[error("Too many requests, please try again later")]
    RateLimited,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PotError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PotError::MissingToken => StatusCode::UNAUTHORIZED,
            PotError::InvalidToken | PotError::Forbidden => StatusCode::FORBIDDEN,
            PotError::UserNotFound | PotError::NotFound => StatusCode::NOT_FOUND,
            PotError::InvalidCredentials | PotError::InvalidRole(_) => StatusCode::BAD_REQUEST,
            PotError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            PotError::Database(_) | PotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PotError::MissingToken => ErrorKind::Unauthorized,
            PotError::InvalidToken | PotError::Forbidden => ErrorKind::Forbidden,
            PotError::UserNotFound | PotError::NotFound => ErrorKind::NotFound,
            PotError::InvalidCredentials | PotError::InvalidRole(_) => ErrorKind::BadRequest,
            PotError::RateLimited => ErrorKind::TooManyRequests,
            PotError::Database(_) | PotError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error at a severity matched to its kind
    fn log(&self) {
        match self {
            PotError::Database(e) => {
                tracing::error!(error = %e, "Pot database error");
            }
            PotError::Internal(msg) => {
                tracing::error!(message = %msg, "Pot internal error");
            }
            PotError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            PotError::InvalidToken => {
                tracing::warn!("Rejected invalid token");
            }
            _ => {
                tracing::debug!(error = %self, "Pot error");
            }
        }
    }
}

impl IntoResponse for PotError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_taxonomy() {
        assert_eq!(PotError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(PotError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(PotError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(PotError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            PotError::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PotError::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            PotError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn credentials_error_is_uniform() {
        // One message for unknown email and wrong password alike
        assert_eq!(
            PotError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
    }
}
