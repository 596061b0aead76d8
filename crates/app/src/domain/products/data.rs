//! Products Data

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub stock: u32,
}

/// Product Update Data
///
/// Replaces every field of the product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub stock: u32,
}
