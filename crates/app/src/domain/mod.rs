//! Catalog, cart and order domains

pub mod carts;
pub mod orders;
pub mod products;
