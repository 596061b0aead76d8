//! Order Records

use jiff::Timestamp;

use crate::{auth::UserUuid, domain::products::records::ProductUuid, uuids::TypedUuid};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// Immutable once created. `total` always equals the sum of the item line totals.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub total: u64,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Record
///
/// `price` is the unit price captured at checkout, not a live product reference.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub price: u64,
    pub created_at: Timestamp,
}

impl OrderItemRecord {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        // Checkout refuses lines whose total overflows, so stored lines never saturate.
        self.price.saturating_mul(u64::from(self.quantity))
    }
}
