//! Register User Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;

use checkout_app::auth::Credentials;

use crate::{
    auth::errors::into_status_error, extensions::*, state::State, users::me::UserResponse,
};

/// Register User Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct RegisterUserRequest {
    /// Email address, used as the login handle
    #[serde(alias = "handle")]
    pub email: String,

    pub password: String,
}

impl std::fmt::Debug for RegisterUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterUserRequest> for Credentials {
    fn from(request: RegisterUserRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Register User Handler
#[endpoint(
    tags("users"),
    summary = "Register User",
    responses(
        (status_code = StatusCode::CREATED, description = "User registered"),
        (status_code = StatusCode::CONFLICT, description = "User already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, "/users/me", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json((&user).into()))
}
