//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checkout_app::domain::carts::data::CartItemUpdate;

use crate::{
    carts::{errors::into_status_error, get::CartLineResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity, replacing the current one
    pub quantity: i64,
}

impl From<UpdateCartItemRequest> for CartItemUpdate {
    fn from(request: UpdateCartItemRequest) -> Self {
        CartItemUpdate {
            quantity: request.quantity,
        }
    }
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart line"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not in cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let line = state
        .app
        .carts
        .update_item(
            user.uuid,
            product.into_inner().into(),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}
