//! Discount utilities
//!
//! Percentage maths shared by coupons and bundles.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Build a percentage from basis points (`500` is 5%).
pub fn percentage_from_bps(bps: u32) -> Percentage {
    Percentage::from(f64::from(bps) / 10_000.0)
}

/// Calculate `percent` of an amount in minor units, rounding half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] when the product cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: u64) -> Result<u64, DiscountError> {
    let minor = Decimal::from_u64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(DiscountError::PercentConversion)
}
