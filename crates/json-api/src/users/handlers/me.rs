//! Current User Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checkout_app::auth::UserRecord;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    /// The normalized email address used to log in
    pub email: String,

    /// The date and time the user registered
    pub created_at: String,
}

impl From<&UserRecord> for UserResponse {
    fn from(user: &UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            email: user.email.clone(),
            created_at: user.created_at.to_string(),
        }
    }
}

/// Current User Handler
///
/// Returns the user the bearer token belongs to.
#[endpoint(
    tags("users"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let user = depot.current_user_or_401()?;

    Ok(Json(user.into()))
}
