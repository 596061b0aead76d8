//! Auth data models.

use jiff::Timestamp;

use crate::{auth::TOKEN_TYPE, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// A registered user. The password hash never leaves the repository layer.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Registration or login credentials.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// User row together with its stored verifier, used only during login.
#[derive(Debug, Clone)]
pub(crate) struct UserCredentialRecord {
    pub user: UserRecord,
    pub password_hash: String,
}

/// Signed session token handed back on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: Timestamp,
}

impl IssuedToken {
    #[must_use]
    pub fn bearer(access_token: String, expires_at: Timestamp) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE,
            expires_at,
        }
    }
}

/// Trim and lower-case a login handle so lookups are case-insensitive.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let credentials = Credentials {
            email: "a@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let debug = format!("{credentials:?}");

        assert!(!debug.contains("hunter2"), "password leaked into debug output");
    }
}
