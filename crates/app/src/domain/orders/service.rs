//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::orders::{
        errors::OrdersServiceError,
        records::{OrderItemRecord, OrderRecord, OrderUuid},
        repository::PgOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

/// Distribute items onto their parent orders, preserving item order.
fn attach_items(orders: &mut [OrderRecord], items: Vec<OrderItemRecord>) {
    let mut by_order: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

    for item in items {
        by_order.entry(item.order_uuid).or_default().push(item);
    }

    for order in orders {
        if let Some(items) = by_order.remove(&order.uuid) {
            order.items = items;
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.repository.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self.repository.list_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        attach_items(&mut orders, items);

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self.repository.get_order(&mut tx, user, order).await?;

        order.items = self
            .repository
            .list_order_items(&mut tx, &[order.uuid])
            .await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// All orders placed by the user, oldest first, each with its line items.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A single order placed by the user.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::carts::CartsService,
        test::{TestContext, helpers::{add_to_cart, create_product}},
    };

    use super::*;

    #[tokio::test]
    async fn list_orders_empty_for_new_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("orders@example.com").await;

        assert!(ctx.orders.list_orders(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_returns_own_orders_in_creation_order() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = ctx.create_user("alice@example.com").await;
        let bob = ctx.create_user("bob@example.com").await;

        let product = create_product(&ctx, "Mug", 7_50).await?;

        add_to_cart(&ctx, alice.uuid, product.uuid, 1).await?;
        let first = ctx.carts.checkout(alice.uuid).await?;

        add_to_cart(&ctx, bob.uuid, product.uuid, 4).await?;
        ctx.carts.checkout(bob.uuid).await?;

        add_to_cart(&ctx, alice.uuid, product.uuid, 2).await?;
        let second = ctx.carts.checkout(alice.uuid).await?;

        let orders = ctx.orders.list_orders(alice.uuid).await?;

        assert_eq!(orders, vec![first, second]);

        Ok(())
    }

    #[tokio::test]
    async fn get_order_returns_items() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("carol@example.com").await;

        let a = create_product(&ctx, "A", 3_00).await?;
        let b = create_product(&ctx, "B", 4_00).await?;

        add_to_cart(&ctx, user.uuid, a.uuid, 1).await?;
        add_to_cart(&ctx, user.uuid, b.uuid, 2).await?;

        let placed = ctx.carts.checkout(user.uuid).await?;

        let fetched = ctx.orders.get_order(user.uuid, placed.uuid).await?;

        assert_eq!(fetched, placed);
        assert_eq!(fetched.total, 11_00);
        assert_eq!(fetched.items.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn get_order_of_another_user_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("owner@example.com").await;
        let other = ctx.create_user("other@example.com").await;

        let product = create_product(&ctx, "Lamp", 20_00).await?;

        add_to_cart(&ctx, owner.uuid, product.uuid, 1).await?;
        let order = ctx.carts.checkout(owner.uuid).await?;

        let result = ctx.orders.get_order(other.uuid, order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_order_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("dave@example.com").await;

        let result = ctx.orders.get_order(user.uuid, OrderUuid::new()).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
