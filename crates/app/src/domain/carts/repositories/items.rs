//! Cart Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    domain::{
        carts::records::{CartItemRecord, CartItemUuid},
        products::records::ProductUuid,
    },
};

const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const LOCK_CART_ITEMS_SQL: &str = include_str!("../sql/lock_cart_items.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("../sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("../sql/delete_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a line or add to the quantity of the existing one, atomically.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPSERT_CART_ITEM_SQL)
            .bind(CartItemUuid::new())
            .bind(user)
            .bind(product)
            .bind(i64::from(quantity))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LIST_CART_ITEMS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    /// List the user's lines and hold row locks on them until the transaction ends.
    pub(crate) async fn lock_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LOCK_CART_ITEMS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPDATE_CART_ITEM_SQL)
            .bind(user)
            .bind(product)
            .bind(i64::from(quantity))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(user)
            .bind(product)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete exactly the given lines. Lines added since they were read are untouched.
    pub(crate) async fn delete_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[CartItemUuid],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = items.iter().copied().map(CartItemUuid::into_uuid).collect();

        let rows_affected = query(DELETE_CART_ITEMS_SQL)
            .bind(uuids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity = u32::try_from(row.try_get::<i64, _>("quantity")?).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            quantity,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
