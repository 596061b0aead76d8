//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use checkout_app::{
    auth::{MockAuthService, UserRecord, UserUuid},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid, CartLine, LineAvailability},
        },
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) fn test_user() -> UserRecord {
    UserRecord {
        uuid: TEST_USER_UUID,
        email: "shopper@example.com".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

/// Service mocks backing a test router. Unset mocks fail any call made to them.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
}

impl Mocks {
    pub(crate) fn with_auth(auth: MockAuthService) -> Self {
        Self {
            auth,
            ..Self::default()
        }
    }

    pub(crate) fn with_products(products: MockProductsService) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub(crate) fn with_carts(carts: MockCartsService) -> Self {
        Self {
            carts,
            ..Self::default()
        }
    }

    pub(crate) fn with_orders(orders: MockOrdersService) -> Self {
        Self {
            orders,
            ..Self::default()
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
        })
    }
}

/// A service for `route` as seen by an anonymous caller.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// A service for `route` with [`test_user`] already authenticated.
pub(crate) fn user_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Widget".to_string(),
        description: Some("A small widget".to_string()),
        price: 10_00,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_cart_line(product: ProductUuid, quantity: u32) -> CartLine {
    CartLine {
        item: CartItemRecord {
            uuid: CartItemUuid::new(),
            user_uuid: TEST_USER_UUID,
            product_uuid: product,
            quantity,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        },
        availability: LineAvailability::Available {
            name: "Widget".to_string(),
            unit_price: 10_00,
            line_total: u64::from(quantity) * 10_00,
        },
    }
}

pub(crate) fn make_order(product: ProductUuid, quantity: u32) -> OrderRecord {
    let uuid = OrderUuid::new();

    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        total: u64::from(quantity) * 10_00,
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: product,
            quantity,
            price: 10_00,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
    }
}
