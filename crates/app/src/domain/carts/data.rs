//! Cart Data

use crate::domain::products::records::ProductUuid;

/// New Cart Item Data
///
/// `quantity` is as supplied by the caller and validated by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: i64,
}

/// Cart Item Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemUpdate {
    pub quantity: i64,
}
