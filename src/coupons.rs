//! Coupons

use decimal_percentage::Percentage;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::discounts::{DiscountError, percent_of_minor, percentage_from_bps};

/// A percentage-off coupon applied to the merchandise total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    code: String,
    percent_bps: u32,
    expires_at: Option<Timestamp>,
    is_active: bool,
}

impl Coupon {
    /// Create an active, non-expiring coupon. Codes are stored upper-case.
    pub fn new(code: &str, percent_bps: u32) -> Self {
        Self {
            code: code.to_ascii_uppercase(),
            percent_bps: percent_bps.min(10_000),
            expires_at: None,
            is_active: true,
        }
    }

    /// Set the instant after which the coupon no longer applies.
    #[must_use]
    pub fn with_expiry(mut self, expires_at: Option<Timestamp>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Mark the coupon active or inactive.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Return the normalised code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the discount in basis points.
    pub fn percent_bps(&self) -> u32 {
        self.percent_bps
    }

    /// Return the expiry instant, if any.
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// Return the discount as a percentage.
    pub fn percentage(&self) -> Percentage {
        percentage_from_bps(self.percent_bps)
    }

    /// Whether `code` names this coupon. Matching is exact apart from ASCII case.
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }

    /// Whether the coupon can be redeemed at `at`.
    pub fn is_redeemable_at(&self, at: Timestamp) -> bool {
        self.is_active && self.expires_at.is_none_or(|expires_at| at < expires_at)
    }

    /// The discount this coupon grants on `amount` minor units.
    ///
    /// # Errors
    ///
    /// Returns an error when the percentage cannot be applied to the amount.
    pub fn discount_on(&self, amount: u64) -> Result<u64, DiscountError> {
        Ok(percent_of_minor(&self.percentage(), amount)?.min(amount))
    }
}

/// Find the coupon redeemable at `at` for the given code.
///
/// Unknown, inactive and expired codes all yield `None`; callers treat that as "no discount"
/// rather than an error.
pub fn find_coupon<'c>(coupons: &'c [Coupon], code: &str, at: Timestamp) -> Option<&'c Coupon> {
    coupons
        .iter()
        .find(|coupon| coupon.matches(code) && coupon.is_redeemable_at(at))
}

#[cfg(test)]
mod tests {
    use jiff::{Span, Timestamp};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn codes_match_case_insensitively() {
        let coupon = Coupon::new("DUR5", 500);

        assert!(coupon.matches("dur5"));
        assert!(coupon.matches("DuR5"));
        assert!(!coupon.matches("DUR5 "));
        assert!(!coupon.matches("DUR"));
    }

    #[test]
    fn dur5_takes_fifty_off_one_thousand() -> TestResult {
        let coupon = Coupon::new("DUR5", 500);

        assert_eq!(coupon.discount_on(1_000)?, 50);

        Ok(())
    }

    #[test]
    fn expired_coupons_are_not_found() -> TestResult {
        let now = Timestamp::now();
        let coupons = [Coupon::new("OLD10", 1_000).with_expiry(Some(now - Span::new().hours(1)))];

        assert!(find_coupon(&coupons, "old10", now).is_none());

        Ok(())
    }

    #[test]
    fn inactive_coupons_are_not_found() {
        let coupons = [Coupon::new("OFF", 1_000).with_active(false)];

        assert!(find_coupon(&coupons, "OFF", Timestamp::now()).is_none());
    }

    #[test]
    fn percentages_are_capped_at_one_hundred() -> TestResult {
        let coupon = Coupon::new("ALL", 25_000);

        assert_eq!(coupon.percent_bps(), 10_000);
        assert_eq!(coupon.discount_on(700)?, 700);

        Ok(())
    }
}
