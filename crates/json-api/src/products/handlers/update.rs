//! Update Product Handler

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

use checkout_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Update Product Request
///
/// Replaces every field; omitted optional fields are cleared.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Price in pence/cents
    pub price: u64,

    #[serde(default)]
    pub stock: u32,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
        }
    }
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .update_product(product.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use checkout_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::test_helpers::{Mocks, make_product, user_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        user_service(
            Mocks::with_products(products),
            Router::with_path("products/{product}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut updated = make_product(uuid);
        updated.price = 12_50;

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |u, update| {
                *u == uuid
                    && *update
                        == ProductUpdate {
                            name: "Widget".to_string(),
                            description: None,
                            price: 12_50,
                            stock: 2,
                        }
            })
            .return_once(move |_, _| Ok(updated));

        products.expect_get_product().never();
        products.expect_list_products().never();
        products.expect_create_product().never();
        products.expect_delete_product().never();

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "name": "Widget", "price": 12_50, "stock": 2 }))
            .send(&make_service(products))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.price, 12_50);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({ "name": "Widget", "price": 100 }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
