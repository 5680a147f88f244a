//! Bundle Pricing
//!
//! Build-your-own bundles are priced on their own path: the discount is taken from the sum of
//! each selected product's first variant price, whatever variant the buyer later picks. Bundle
//! quotes never feed into cart pricing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    discounts::{percent_of_minor, percentage_from_bps},
    pricing::PricingError,
};

/// Bundle discount rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleRule {
    /// Minimum number of products before the discount applies.
    pub min_items: usize,

    /// Discount in basis points.
    pub percent_bps: u32,
}

impl Default for BundleRule {
    fn default() -> Self {
        Self {
            min_items: 3,
            percent_bps: 1_500,
        }
    }
}

/// A product selected into a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleLine {
    /// Selected product.
    pub product_uuid: Uuid,

    /// Price of the product's first variant.
    pub first_variant_price: u64,
}

/// Priced bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleQuote {
    /// Sum of first variant prices.
    pub items_total: u64,

    /// Discount granted.
    pub discount: u64,

    /// `items_total - discount`.
    pub total: u64,

    /// Whether the bundle reached the minimum size.
    pub eligible: bool,

    /// Products still needed to reach the minimum size.
    pub missing_items: usize,
}

/// Price a bundle.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the total does not fit, or a discount error if the
/// percentage cannot be applied.
pub fn price_bundle(lines: &[BundleLine], rule: &BundleRule) -> Result<BundleQuote, PricingError> {
    let items_total = lines.iter().try_fold(0_u64, |acc, line| {
        acc.checked_add(line.first_variant_price)
            .ok_or(PricingError::Overflow)
    })?;

    let eligible = lines.len() >= rule.min_items;

    let discount = if eligible {
        percent_of_minor(&percentage_from_bps(rule.percent_bps), items_total)?.min(items_total)
    } else {
        0
    };

    Ok(BundleQuote {
        items_total,
        discount,
        total: items_total - discount,
        eligible,
        missing_items: rule.min_items.saturating_sub(lines.len()),
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn lines(prices: &[u64]) -> Vec<BundleLine> {
        prices
            .iter()
            .map(|&first_variant_price| BundleLine {
                product_uuid: Uuid::now_v7(),
                first_variant_price,
            })
            .collect()
    }

    #[test]
    fn three_products_get_fifteen_percent_off() -> TestResult {
        let quote = price_bundle(&lines(&[1_000, 600, 400]), &BundleRule::default())?;

        assert!(quote.eligible);
        assert_eq!(quote.items_total, 2_000);
        assert_eq!(quote.discount, 300);
        assert_eq!(quote.total, 1_700);
        assert_eq!(quote.missing_items, 0);

        Ok(())
    }

    #[test]
    fn two_products_are_not_discounted() -> TestResult {
        let quote = price_bundle(&lines(&[1_000, 600]), &BundleRule::default())?;

        assert!(!quote.eligible);
        assert_eq!(quote.discount, 0);
        assert_eq!(quote.total, 1_600);
        assert_eq!(quote.missing_items, 1);

        Ok(())
    }

    #[test]
    fn empty_bundle_prices_to_zero() -> TestResult {
        let quote = price_bundle(&[], &BundleRule::default())?;

        assert_eq!(quote.total, 0);
        assert_eq!(quote.missing_items, 3);

        Ok(())
    }
}
