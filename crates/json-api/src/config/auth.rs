//! Auth Config

use clap::Args;

use checkout_app::auth::{
    DEFAULT_TOKEN_LIFETIME_MINUTES, TokenAlgorithm, TokenError, TokenSecret, TokenSettings,
};

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    #[arg(long, env = "TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Token signing algorithm (HS256, HS384, HS512)
    #[arg(long, env = "TOKEN_ALGORITHM", default_value = "HS256")]
    pub token_algorithm: TokenAlgorithm,

    /// Session token lifetime in minutes
    #[arg(long, env = "TOKEN_LIFETIME_MINUTES", default_value_t = DEFAULT_TOKEN_LIFETIME_MINUTES)]
    pub token_lifetime_minutes: u32,
}

impl AuthConfig {
    /// Build the signing settings handed to the auth service.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty.
    pub fn token_settings(&self) -> Result<TokenSettings, TokenError> {
        Ok(TokenSettings::new(
            TokenSecret::new(self.token_secret.as_bytes())?,
            self.token_algorithm,
            self.token_lifetime_minutes,
        ))
    }
}
