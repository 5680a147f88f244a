//! Pricing
//!
//! Feeds the pure pricing engine with authoritative catalog state: current prices, active
//! coupons and the running gift campaign.

pub mod data;
pub mod errors;
pub mod lines;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::PricingServiceError;
pub use service::*;
