//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// The product or the cart line does not exist.
    #[error("not found")]
    NotFound,

    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("cart is empty")]
    EmptyCart,

    #[error("amount out of range")]
    InvalidAmount,

    #[error("transaction failed")]
    TransactionFailed(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound,
            Some(ErrorKind::CheckViolation) => Self::InvalidQuantity,
            Some(_) | None => Self::TransactionFailed(error),
        }
    }
}
