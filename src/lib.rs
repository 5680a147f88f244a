//! Storefront
//!
//! The I/O-free core of the storefront checkout: the cart aggregate, the pricing and campaign
//! engine, coupon and bundle discounts, and the order status state machine. Every amount is an
//! integer number of minor currency units.

pub mod bundles;
pub mod campaigns;
pub mod cart;
pub mod coupons;
pub mod discounts;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod pricing;
