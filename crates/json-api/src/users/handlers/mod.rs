//! User Handlers

pub(crate) mod me;
pub(crate) mod orders;
pub(crate) mod register;
