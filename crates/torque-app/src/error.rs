//! Error types for the application layer.

use torque_core::ValidationError;
use torque_db::DbError;

/// Application-layer errors.
///
/// `InvalidCredentials` is deliberately payload-free: login failures must not
/// reveal whether the email exists or the password was wrong.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for application results.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build a `Forbidden` error from anything stringy.
    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    /// Build a `NotFound` error from anything stringy.
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }
}
