//! Session token encoding, signing and verification.
//!
//! Tokens are compact JWS strings (`header.claims.signature`, base64url without
//! padding) signed with an HMAC over the server-held secret.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use hmac::{Hmac, Mac, digest::KeyInit};
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Token type reported to clients.
pub const TOKEN_TYPE: &str = "bearer";

/// Default session lifetime.
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: u32 = 60;

const JWT_TYPE: &str = "JWT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenAlgorithm {
    #[default]
    Hs256,
    Hs384,
    Hs512,
}

impl TokenAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hs256 => "HS256",
            Self::Hs384 => "HS384",
            Self::Hs512 => "HS512",
        }
    }
}

impl fmt::Display for TokenAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenAlgorithm {
    type Err = TokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(Self::Hs256),
            "HS384" => Ok(Self::Hs384),
            "HS512" => Ok(Self::Hs512),
            _ => Err(TokenError::UnsupportedAlgorithm),
        }
    }
}

/// Signing key, wiped from memory on drop.
#[derive(Clone)]
pub struct TokenSecret {
    bytes: Vec<u8>,
}

impl TokenSecret {
    /// Wrap a signing secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let bytes = secret.into();

        if bytes.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        Ok(Self { bytes })
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Signing configuration for session tokens.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: TokenSecret,
    pub algorithm: TokenAlgorithm,
    pub lifetime: SignedDuration,
}

impl TokenSettings {
    #[must_use]
    pub fn new(secret: TokenSecret, algorithm: TokenAlgorithm, lifetime_minutes: u32) -> Self {
        Self {
            secret,
            algorithm,
            lifetime: SignedDuration::from_mins(i64::from(lifetime_minutes)),
        }
    }
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user UUID.
    pub sub: Uuid,

    /// Issued-at, unix seconds.
    pub iat: i64,

    /// Expiry, unix seconds.
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is empty")]
    EmptySecret,

    #[error("token algorithm is not supported")]
    UnsupportedAlgorithm,

    #[error("token format is invalid")]
    InvalidFormat,

    #[error("token segment encoding is invalid")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("token payload is invalid")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("token algorithm does not match")]
    AlgorithmMismatch,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token expiry is out of range")]
    ExpiryOutOfRange,
}

/// Encodes and verifies signed session tokens.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    settings: TokenSettings,
}

impl TokenCodec {
    #[must_use]
    pub fn new(settings: TokenSettings) -> Self {
        Self { settings }
    }

    /// Issue a token for `subject`, valid for the configured lifetime from `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry overflows or serialization fails.
    pub fn encode(
        &self,
        subject: Uuid,
        issued_at: Timestamp,
    ) -> Result<(String, Timestamp), TokenError> {
        let expires_at = issued_at
            .checked_add(self.settings.lifetime)
            .map_err(|_overflow| TokenError::ExpiryOutOfRange)?;

        let header = Header {
            alg: self.settings.algorithm.as_str().to_string(),
            typ: JWT_TYPE.to_string(),
        };

        let claims = Claims {
            sub: subject,
            iat: issued_at.as_second(),
            exp: expires_at.as_second(),
        };

        let signing_input = format!(
            "{}.{}",
            BASE64.encode(serde_json::to_vec(&header)?),
            BASE64.encode(serde_json::to_vec(&claims)?)
        );

        let signature = self.sign(signing_input.as_bytes());

        Ok((
            format!("{signing_input}.{}", BASE64.encode(signature)),
            expires_at,
        ))
    }

    /// Verify a token's structure, algorithm, signature and expiry against `now`.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the token was rejected.
    pub fn decode(&self, token: &str, now: Timestamp) -> Result<Claims, TokenError> {
        let mut segments = token.trim().split('.');

        let (Some(header), Some(claims), Some(signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(TokenError::InvalidFormat);
        };

        let decoded_header: Header = serde_json::from_slice(&BASE64.decode(header)?)?;

        if decoded_header.alg != self.settings.algorithm.as_str() {
            return Err(TokenError::AlgorithmMismatch);
        }

        let signing_input = format!("{header}.{claims}");

        if !self.verify(signing_input.as_bytes(), &BASE64.decode(signature)?) {
            return Err(TokenError::InvalidSignature);
        }

        let claims: Claims = serde_json::from_slice(&BASE64.decode(claims)?)?;

        if claims.exp <= now.as_second() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, input: &[u8]) -> Vec<u8> {
        let key = self.settings.secret.as_bytes();

        match self.settings.algorithm {
            TokenAlgorithm::Hs256 => sign_with::<Hmac<Sha256>>(key, input),
            TokenAlgorithm::Hs384 => sign_with::<Hmac<Sha384>>(key, input),
            TokenAlgorithm::Hs512 => sign_with::<Hmac<Sha512>>(key, input),
        }
    }

    fn verify(&self, input: &[u8], signature: &[u8]) -> bool {
        let key = self.settings.secret.as_bytes();

        match self.settings.algorithm {
            TokenAlgorithm::Hs256 => verify_with::<Hmac<Sha256>>(key, input, signature),
            TokenAlgorithm::Hs384 => verify_with::<Hmac<Sha384>>(key, input, signature),
            TokenAlgorithm::Hs512 => verify_with::<Hmac<Sha512>>(key, input, signature),
        }
    }
}

// HMAC accepts keys of any length, so keying cannot fail for a non-empty secret.
fn keyed<M: Mac + KeyInit>(key: &[u8], input: &[u8]) -> Option<M> {
    let mut mac = <M as KeyInit>::new_from_slice(key).ok()?;

    mac.update(input);

    Some(mac)
}

fn sign_with<M: Mac + KeyInit>(key: &[u8], input: &[u8]) -> Vec<u8> {
    keyed::<M>(key, input)
        .map(|mac| mac.finalize().into_bytes().to_vec())
        .unwrap_or_default()
}

fn verify_with<M: Mac + KeyInit>(key: &[u8], input: &[u8], signature: &[u8]) -> bool {
    keyed::<M>(key, input).is_some_and(|mac| mac.verify_slice(signature).is_ok())
}
