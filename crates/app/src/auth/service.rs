//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::task::spawn_blocking;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, TokenCodec, TokenSettings,
        models::{Credentials, IssuedToken, UserRecord, UserUuid, normalize_email},
        password::{hash_password, verify_password},
        repository::PgUsersRepository,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgUsersRepository,
    tokens: TokenCodec,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, settings: TokenSettings) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            tokens: TokenCodec::new(settings),
        }
    }

    fn issue_token(
        &self,
        user: UserUuid,
        issued_at: Timestamp,
    ) -> Result<IssuedToken, AuthServiceError> {
        let (access_token, expires_at) = self.tokens.encode(user.into_uuid(), issued_at)?;

        Ok(IssuedToken::bearer(access_token, expires_at))
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, credentials: Credentials) -> Result<UserRecord, AuthServiceError> {
        let email = normalize_email(&credentials.email);
        let password = credentials.password;

        if email.is_empty() || password.is_empty() {
            return Err(AuthServiceError::MissingRequiredData);
        }

        let password_hash = spawn_blocking(move || hash_password(&password)).await??;

        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .create_user(&mut tx, UserUuid::new(), &email, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, "registered user");

        Ok(user)
    }

    async fn authenticate(&self, credentials: Credentials) -> Result<IssuedToken, AuthServiceError> {
        let email = normalize_email(&credentials.email);

        let mut tx = self.db.begin_transaction().await?;

        let record = self.repository.find_user_by_email(&mut tx, &email).await?;

        tx.commit().await?;

        let Some(record) = record else {
            return Err(AuthServiceError::Unauthorized);
        };

        let password = credentials.password;
        let password_hash = record.password_hash;

        let valid = spawn_blocking(move || verify_password(&password, &password_hash)).await??;

        if !valid {
            return Err(AuthServiceError::Unauthorized);
        }

        self.issue_token(record.user.uuid, Timestamp::now())
    }

    async fn resolve(&self, token: &str) -> Result<UserRecord, AuthServiceError> {
        let claims = self
            .tokens
            .decode(token, Timestamp::now())
            .map_err(|error| {
                debug!("rejected session token: {error}");

                AuthServiceError::Unauthorized
            })?;

        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .repository
            .get_user(&mut tx, UserUuid::from_uuid(claims.sub))
            .await?;

        tx.commit().await?;

        user.ok_or(AuthServiceError::Unauthorized)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user, storing only a one-way hash of the password.
    async fn register(&self, credentials: Credentials) -> Result<UserRecord, AuthServiceError>;

    /// Check credentials and issue a signed session token.
    async fn authenticate(&self, credentials: Credentials) -> Result<IssuedToken, AuthServiceError>;

    /// Resolve a session token to the user it was issued for.
    async fn resolve(&self, token: &str) -> Result<UserRecord, AuthServiceError>;
}
