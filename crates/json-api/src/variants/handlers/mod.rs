//! Variant Handlers

pub(crate) mod active;
pub(crate) mod stock;
