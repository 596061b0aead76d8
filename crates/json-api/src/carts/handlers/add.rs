//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use checkout_app::domain::carts::data::NewCartItem;

use crate::{
    carts::{errors::into_status_error, get::CartLineResponse},
    extensions::*,
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    #[serde(alias = "product_uuid")]
    pub product_id: Uuid,

    /// Units to add, merged into an existing line for the same product
    pub quantity: i64,
}

impl From<AddToCartRequest> for NewCartItem {
    fn from(request: AddToCartRequest) -> Self {
        NewCartItem {
            product_uuid: request.product_id.into(),
            quantity: request.quantity,
        }
    }
}

/// Add To Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart line"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let line = state
        .app
        .carts
        .add_item(user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(line.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use checkout_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_cart_line, user_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        user_service(Mocks::with_carts(carts), Router::with_path("cart").post(handler))
    }

    #[tokio::test]
    async fn test_add_to_cart_returns_line() -> TestResult {
        let product = ProductUuid::new();
        let line = make_cart_line(product, 5);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |user, item| {
                *user == TEST_USER_UUID
                    && *item
                        == NewCartItem {
                            product_uuid: product,
                            quantity: 2,
                        }
            })
            .return_once(move |_, _| Ok(line));

        carts.expect_view_cart().never();
        carts.expect_update_item().never();
        carts.expect_remove_item().never();
        carts.expect_checkout().never();

        let mut res = TestClient::post("http://example.com/cart")
            .json(&json!({ "product_id": product.into_uuid(), "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: CartLineResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.product_uuid, product.into_uuid());
        assert_eq!(body.quantity, 5);
        assert_eq!(body.line_total, Some(50_00));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_to_cart_accepts_product_uuid_alias() -> TestResult {
        let product = ProductUuid::new();
        let line = make_cart_line(product, 1);

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |_, item| item.product_uuid == product)
            .return_once(move |_, _| Ok(line));

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "product_uuid": product.into_uuid(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "product_id": ProductUuid::new().into_uuid(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_non_positive_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, item| item.quantity == 0)
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "product_id": ProductUuid::new().into_uuid(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_non_integer_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart")
            .json(&json!({ "product_id": ProductUuid::new().into_uuid(), "quantity": "two" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
