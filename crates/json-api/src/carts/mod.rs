//! Carts

pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
