//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checkout_app::domain::carts::records::{CartLine, CartRecord, LineAvailability};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// A cart line priced at the product's current price.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    /// The product in the cart
    pub product_uuid: Uuid,

    /// Units of the product
    pub quantity: u32,

    /// `false` once the product has been removed from the catalog
    pub available: bool,

    /// Product name, absent for unavailable lines
    pub name: Option<String>,

    /// Current unit price in pence/cents, absent for unavailable lines
    pub unit_price: Option<u64>,

    /// `unit_price * quantity`, absent for unavailable lines
    pub line_total: Option<u64>,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        let (name, unit_price, line_total) = match line.availability {
            LineAvailability::Available {
                name,
                unit_price,
                line_total,
            } => (Some(name), Some(unit_price), Some(line_total)),
            LineAvailability::Unavailable => (None, None, None),
        };

        CartLineResponse {
            uuid: line.item.uuid.into(),
            product_uuid: line.item.product_uuid.into(),
            quantity: line.item.quantity,
            available: name.is_some(),
            name,
            unit_price,
            line_total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Cart lines, oldest first
    pub items: Vec<CartLineResponse>,

    /// Sum of the available line totals in pence/cents
    pub total: u64,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            items: cart.lines.into_iter().map(Into::into).collect(),
            total: cart.total,
        }
    }
}

/// Get Cart Handler
///
/// Returns the current user's cart with computed totals.
#[endpoint(
    tags("cart"),
    summary = "View Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart contents"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let cart = state
        .app
        .carts
        .view_cart(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
