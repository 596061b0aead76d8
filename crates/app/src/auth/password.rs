//! Password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;

/// Only this many bytes of a password take part in hashing and verification.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    Hash(#[source] password_hash::Error),

    #[error("stored password hash is malformed")]
    MalformedHash(#[source] password_hash::Error),
}

/// Hash a password into an Argon2id PHC string with a random salt.
///
/// # Errors
///
/// Returns an error if Argon2 fails to produce a hash.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(bounded(password).as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hash)
}

/// Check a password against a stored PHC string.
///
/// A wrong password is `Ok(false)`; only an unreadable stored hash is an error.
///
/// # Errors
///
/// Returns an error if `password_hash` is not a valid PHC string.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(password_hash).map_err(PasswordError::MalformedHash)?;

    match Argon2::default().verify_password(bounded(password).as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(PasswordError::Hash(error)),
    }
}

fn bounded(password: &str) -> &str {
    if password.len() <= MAX_PASSWORD_BYTES {
        return password;
    }

    let end = (0..=MAX_PASSWORD_BYTES)
        .rev()
        .find(|index| password.is_char_boundary(*index))
        .unwrap_or(0);

    password.get(..end).unwrap_or_default()
}
