//! Product Handlers

pub(crate) mod active;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod variants;
