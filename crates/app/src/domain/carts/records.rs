//! Cart Records

use jiff::Timestamp;

use crate::{auth::UserUuid, domain::products::records::ProductUuid, uuids::TypedUuid};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
///
/// At most one exists per (user, product) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Whether a cart line can currently be bought.
#[derive(Debug, Clone, PartialEq)]
pub enum LineAvailability {
    /// The product is in the catalog, priced at its current price.
    Available {
        name: String,
        unit_price: u64,
        line_total: u64,
    },

    /// The product was removed from the catalog after being added.
    Unavailable,
}

/// A cart item joined with its product.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItemRecord,
    pub availability: LineAvailability,
}

impl CartLine {
    /// Line total, or `None` for an unavailable line.
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        match self.availability {
            LineAvailability::Available { line_total, .. } => Some(line_total),
            LineAvailability::Unavailable => None,
        }
    }
}

/// Cart Record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartRecord {
    pub lines: Vec<CartLine>,

    /// Sum of the available line totals.
    pub total: u64,
}
