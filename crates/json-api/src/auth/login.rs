//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use checkout_app::auth::{Credentials, IssuedToken};

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Email address the account was registered with
    #[serde(alias = "handle")]
    pub email: String,

    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<LoginRequest> for Credentials {
    fn from(request: LoginRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenResponse {
    /// Signed session token to send as `Authorization: Bearer <token>`
    pub access_token: String,

    /// Always `bearer`
    pub token_type: String,

    /// The date and time the token stops being accepted
    pub expires_at: String,
}

impl From<IssuedToken> for TokenResponse {
    fn from(token: IssuedToken) -> Self {
        TokenResponse {
            access_token: token.access_token,
            token_type: token.token_type.to_string(),
            expires_at: token.expires_at.to_string(),
        }
    }
}

/// Login Handler
///
/// Exchanges an email and password for a session token.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<TokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = state
        .app
        .auth
        .authenticate(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(token.into()))
}
