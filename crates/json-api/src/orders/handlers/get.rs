//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checkout_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the order line
    pub uuid: Uuid,

    /// The product bought
    pub product_uuid: Uuid,

    /// Units bought
    pub quantity: u32,

    /// Unit price in pence/cents at the time of checkout
    pub price: u64,

    /// `price * quantity`
    pub line_total: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            price: item.price,
            line_total: item.line_total(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Sum of the line totals in pence/cents
    pub total: u64,

    /// The order lines, in the order they were added to the cart
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            total: order.total,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns one of the current user's orders.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user.uuid, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use checkout_app::domain::{
        orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_order, user_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        user_service(
            Mocks::with_orders(orders),
            Router::with_path("orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_order_returns_items() -> TestResult {
        let product = ProductUuid::new();
        let order = make_order(product, 3);
        let uuid = order.uuid;

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == uuid)
            .return_once(move |_, _| Ok(order));

        orders.expect_list_orders().never();

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.total, 30_00);
        assert_eq!(body.items.len(), 1);
        assert_eq!(body.items[0].product_uuid, product.into_uuid());
        assert_eq!(body.items[0].line_total, 30_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_order_returns_404() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == uuid)
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        orders.expect_list_orders().never();

        let res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_order_with_malformed_uuid_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();
        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders/not-a-uuid")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
