//! App Router

use salvo::Router;

use crate::{auth, carts, healthcheck, orders, products, users};

/// Every API route. Expects an `Arc<State>` to be injected by an outer hoop.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("users")
                .post(users::register::handler)
                .push(Router::with_path("register").post(users::register::handler))
                .push(Router::with_path("login").post(auth::login::handler)),
        )
        .push(Router::with_path("auth/login").post(auth::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("users/me").get(users::me::handler))
                .push(Router::with_path("users/orders").get(users::orders::handler))
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .post(products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .get(products::get::handler)
                                .put(products::update::handler)
                                .delete(products::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .post(carts::add::handler)
                        .push(Router::with_path("checkout").post(carts::checkout::handler))
                        .push(
                            Router::with_path("items/{product}")
                                .put(carts::update_item::handler)
                                .delete(carts::remove_item::handler),
                        ),
                )
                .push(Router::with_path("orders/{order}").get(orders::get::handler)),
        )
}

#[cfg(test)]
mod tests {
    use checkout_app::{
        auth::{AuthServiceError, MockAuthService},
        domain::carts::{MockCartsService, records::CartRecord},
    };
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{
        carts::get::CartResponse,
        test_helpers::{Mocks, TEST_USER_UUID, test_user},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_healthcheck_is_public() -> TestResult {
        let res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() -> TestResult {
        let service = make_service(Mocks::default());

        for url in [
            "http://example.com/products",
            "http://example.com/cart",
            "http://example.com/users/me",
            "http://example.com/users/orders",
        ] {
            let res = TestClient::get(url).send(&service).await;

            assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED), "{url}");
        }

        let res = TestClient::post("http://example.com/cart/checkout")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_before_handlers() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_resolve()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthorized));

        let mut carts = MockCartsService::new();

        carts.expect_view_cart().never();

        let res = TestClient::get("http://example.com/cart")
            .add_header(AUTHORIZATION, "Bearer expired", true)
            .send(&make_service(Mocks {
                auth,
                carts,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_resolved_user_reaches_cart_handler() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_resolve()
            .once()
            .withf(|token| token == "valid")
            .return_once(|_| Ok(test_user()));

        let mut carts = MockCartsService::new();

        carts
            .expect_view_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(CartRecord::default()));

        let mut res = TestClient::get("http://example.com/cart")
            .add_header(AUTHORIZATION, "Bearer valid", true)
            .send(&make_service(Mocks {
                auth,
                carts,
                ..Mocks::default()
            }))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.items.is_empty());

        Ok(())
    }
}
