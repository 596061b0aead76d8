//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::task::JoinError;

use crate::auth::{PasswordError, TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("user already exists")]
    AlreadyExists,

    /// Bad credentials, or a token that is malformed, expired, forged, or
    /// names a user that no longer exists. Deliberately carries no detail.
    #[error("unauthorized")]
    Unauthorized,

    #[error("email and password are required")]
    MissingRequiredData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("token processing error")]
    Token(#[from] TokenError),

    #[error("password task failed")]
    Task(#[from] JoinError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => {
                Self::MissingRequiredData
            }
            Some(_) | None => Self::Sql(error),
        }
    }
}
