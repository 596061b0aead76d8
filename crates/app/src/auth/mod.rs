//! Authentication and identity

mod errors;
pub mod models;
mod password;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use password::*;
pub use service::*;
pub use token::*;
