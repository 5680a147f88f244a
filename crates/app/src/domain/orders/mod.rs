//! Orders
//!
//! Checkout turns a validated request into a persisted order inside one transaction: variant
//! rows are locked, prices re-read, stock decremented and the order written with a fresh
//! order number. Side effects run only after commit.

pub mod data;
pub mod errors;
pub mod numbers;
pub mod records;
mod repositories;
pub mod service;
pub mod side_effects;
pub mod validation;

pub use errors::OrdersServiceError;
pub use service::*;
