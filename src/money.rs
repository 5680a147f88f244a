//! Money

use std::num::TryFromIntError;

use rusty_money::{Money, iso};

/// Currency every storefront amount is denominated in.
pub const CURRENCY: &iso::Currency = iso::TRY;

/// ISO 4217 code of [`CURRENCY`], as payment providers expect it.
pub const CURRENCY_CODE: &str = "TRY";

/// Render an amount of minor units for display.
///
/// Arithmetic never goes through this; it exists for receipts and emails only.
///
/// # Errors
///
/// Returns an error when the amount does not fit the signed range `rusty-money` works in.
pub fn format_minor(amount: u64) -> Result<String, TryFromIntError> {
    let minor = i64::try_from(amount)?;

    Ok(Money::from_minor(minor, CURRENCY).to_string())
}
