//! Bundle Handlers

pub(crate) mod quote;
