//! Carts service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpdate, NewCartItem},
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartLine, CartRecord, LineAvailability},
            repositories::PgCartItemsRepository,
        },
        orders::{
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    orders_repository: PgOrdersRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
        }
    }
}

fn validate_quantity(quantity: i64) -> Result<u32, CartsServiceError> {
    if quantity <= 0 {
        return Err(CartsServiceError::InvalidQuantity);
    }

    u32::try_from(quantity)
        .ok()
        .ok_or(CartsServiceError::InvalidQuantity)
}

fn price_line(
    item: CartItemRecord,
    product: Option<&ProductRecord>,
) -> Result<CartLine, CartsServiceError> {
    let availability = match product.filter(|product| product.is_available()) {
        Some(product) => LineAvailability::Available {
            name: product.name.clone(),
            unit_price: product.price,
            line_total: product
                .price
                .checked_mul(u64::from(item.quantity))
                .ok_or(CartsServiceError::InvalidAmount)?,
        },
        None => LineAvailability::Unavailable,
    };

    Ok(CartLine { item, availability })
}

/// Join cart items with their products and total the available lines.
fn price_cart(
    items: Vec<CartItemRecord>,
    products: Vec<ProductRecord>,
) -> Result<CartRecord, CartsServiceError> {
    let products: HashMap<ProductUuid, ProductRecord> = products
        .into_iter()
        .map(|product| (product.uuid, product))
        .collect();

    let mut cart = CartRecord::default();

    for item in items {
        let product = products.get(&item.product_uuid);
        let line = price_line(item, product)?;

        if let Some(line_total) = line.line_total() {
            cart.total = cart
                .total
                .checked_add(line_total)
                .ok_or(CartsServiceError::InvalidAmount)?;
        }

        cart.lines.push(line);
    }

    Ok(cart)
}

fn product_uuids(items: &[CartItemRecord]) -> Vec<ProductUuid> {
    items.iter().map(|item| item.product_uuid).collect()
}

fn to_column(amount: u64) -> Result<i64, CartsServiceError> {
    i64::try_from(amount)
        .ok()
        .ok_or(CartsServiceError::InvalidAmount)
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartLine, CartsServiceError> {
        let quantity = validate_quantity(item.quantity)?;

        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product(&mut tx, item.product_uuid)
            .await?;

        let item = self
            .items_repository
            .upsert_cart_item(&mut tx, user, product.uuid, quantity)
            .await?;

        tx.commit().await?;

        price_line(item, Some(&product))
    }

    async fn view_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.items_repository.list_cart_items(&mut tx, user).await?;

        let products = self
            .products_repository
            .find_products(&mut tx, &product_uuids(&items))
            .await?;

        tx.commit().await?;

        price_cart(items, products)
    }

    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        update: CartItemUpdate,
    ) -> Result<CartLine, CartsServiceError> {
        let quantity = validate_quantity(update.quantity)?;

        let mut tx = self.db.begin_transaction().await?;

        let item = self
            .items_repository
            .update_cart_item(&mut tx, user, product, quantity)
            .await?;

        let products = self
            .products_repository
            .find_products(&mut tx, &[product])
            .await?;

        tx.commit().await?;

        price_line(item, products.first())
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, user, product)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn checkout(&self, user: UserUuid) -> Result<OrderRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Concurrent checkouts for the same user block here, then see the cart cleared.
        let items = self.items_repository.lock_cart_items(&mut tx, user).await?;

        if items.is_empty() {
            return Err(CartsServiceError::EmptyCart);
        }

        let locked: Vec<CartItemUuid> = items.iter().map(|item| item.uuid).collect();

        let products = self
            .products_repository
            .find_products(&mut tx, &product_uuids(&items))
            .await?;

        let cart = price_cart(items, products)?;

        let purchasable: Vec<(&CartItemRecord, u64)> = cart
            .lines
            .iter()
            .filter_map(|line| match line.availability {
                LineAvailability::Available { unit_price, .. } => Some((&line.item, unit_price)),
                LineAvailability::Unavailable => None,
            })
            .collect();

        if purchasable.is_empty() {
            return Err(CartsServiceError::EmptyCart);
        }

        // Any failure past this point is TransactionFailed.
        let mut order = self
            .orders_repository
            .create_order(&mut tx, OrderUuid::new(), user, to_column(cart.total)?)
            .await
            .map_err(CartsServiceError::TransactionFailed)?;

        for (item, unit_price) in purchasable {
            let order_item = self
                .orders_repository
                .create_order_item(
                    &mut tx,
                    order.uuid,
                    item.product_uuid,
                    item.quantity,
                    to_column(unit_price)?,
                )
                .await
                .map_err(CartsServiceError::TransactionFailed)?;

            order.items.push(order_item);
        }

        self.items_repository
            .delete_cart_items(&mut tx, &locked)
            .await
            .map_err(CartsServiceError::TransactionFailed)?;

        tx.commit()
            .await
            .map_err(CartsServiceError::TransactionFailed)?;

        info!(
            order_uuid = %order.uuid,
            user_uuid = %user,
            total = order.total,
            items = order.items.len(),
            "checked out cart"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a quantity of a product to the user's cart, merging with any existing line.
    async fn add_item(&self, user: UserUuid, item: NewCartItem)
    -> Result<CartLine, CartsServiceError>;

    /// The user's cart lines with current prices.
    async fn view_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Replace the quantity of an existing cart line.
    async fn update_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        update: CartItemUpdate,
    ) -> Result<CartLine, CartsServiceError>;

    /// Remove one line from the user's cart.
    async fn remove_item(&self, user: UserUuid, product: ProductUuid)
    -> Result<(), CartsServiceError>;

    /// Turn the user's cart into an order and empty the cart, all or nothing.
    async fn checkout(&self, user: UserUuid) -> Result<OrderRecord, CartsServiceError>;
}
