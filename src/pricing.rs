//! Pricing
//!
//! Turns a list of lines carrying *fresh* catalog prices into an authoritative breakdown.
//! Rules apply in a fixed order:
//!
//! 1. `items_total` is the sum of `unit_price * quantity`.
//! 2. Shipping is free once `items_total` reaches the free-shipping threshold, otherwise the
//!    standard or express flat fee.
//! 3. Cash on delivery adds a flat fee.
//! 4. Gift tiers unlocked by `items_total` are reported but never change the price.
//! 5. A redeemable coupon takes its percentage off `items_total`. Unknown codes are not errors.
//!
//! The discount is folded into `subtotal` exactly once, so
//! `total == subtotal + shipping_cost + cod_fee` always holds.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    campaigns::{GiftCampaign, GiftTier, TierProgress},
    coupons::{Coupon, find_coupon},
    discounts::DiscountError,
};

/// Errors raised while pricing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// There was nothing to price.
    #[error("cannot price an empty cart")]
    EmptyCart,

    /// A line references a variant that is deactivated or gone.
    #[error("{product_name} ({variant_uuid}) is no longer available")]
    ItemUnavailable {
        /// Unavailable variant.
        variant_uuid: Uuid,
        /// Product name for messaging.
        product_name: String,
    },

    /// An amount overflowed.
    #[error("price calculation overflowed")]
    Overflow,

    /// A discount could not be computed.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// A stored or submitted method name was not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown method: {0}")]
pub struct UnknownMethodError(pub String);

/// Delivery speed chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    /// Standard delivery.
    Standard,

    /// Express delivery.
    Express,
}

impl ShippingMethod {
    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
        }
    }
}

impl FromStr for ShippingMethod {
    type Err = UnknownMethodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            other => Err(UnknownMethodError(other.to_string())),
        }
    }
}

/// How the buyer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash paid to the courier.
    #[serde(alias = "cash-on-delivery")]
    CashOnDelivery,

    /// Card payment through the external gateway.
    CreditCard,

    /// Manual bank transfer.
    BankTransfer,
}

impl PaymentMethod {
    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cash_on_delivery",
            Self::CreditCard => "credit_card",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownMethodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cash_on_delivery" | "cash-on-delivery" => Ok(Self::CashOnDelivery),
            "credit_card" => Ok(Self::CreditCard),
            "bank_transfer" => Ok(Self::BankTransfer),
            other => Err(UnknownMethodError(other.to_string())),
        }
    }
}

/// The one canonical set of shipping and fee amounts, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Merchandise total at or above which shipping is free.
    pub free_shipping_threshold: u64,

    /// Flat standard shipping fee.
    pub standard_shipping_fee: u64,

    /// Flat express shipping fee.
    pub express_shipping_fee: u64,

    /// Flat cash-on-delivery fee.
    pub cod_fee: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_shipping_threshold: 50_000,
            standard_shipping_fee: 2_990,
            express_shipping_fee: 4_990,
            cod_fee: 1_500,
        }
    }
}

impl PricingConfig {
    /// Shipping cost for a merchandise total.
    pub fn shipping_cost(&self, items_total: u64, method: ShippingMethod) -> u64 {
        if items_total >= self.free_shipping_threshold {
            return 0;
        }

        match method {
            ShippingMethod::Standard => self.standard_shipping_fee,
            ShippingMethod::Express => self.express_shipping_fee,
        }
    }

    /// Fee charged for the payment method.
    pub fn payment_fee(&self, method: PaymentMethod) -> u64 {
        match method {
            PaymentMethod::CashOnDelivery => self.cod_fee,
            PaymentMethod::CreditCard | PaymentMethod::BankTransfer => 0,
        }
    }
}

/// A line priced from fresh catalog state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    /// Parent product.
    pub product_uuid: Uuid,

    /// Variant being bought.
    pub variant_uuid: Uuid,

    /// Current product name.
    pub product_name: String,

    /// Current variant name.
    pub variant_name: String,

    /// Current catalog price.
    pub unit_price: u64,

    /// Quantity requested.
    pub quantity: u32,

    /// Whether the variant and its product are both active.
    pub available: bool,
}

impl PricedLine {
    /// `unit_price * quantity`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the product does not fit.
    pub fn line_total(&self) -> Result<u64, PricingError> {
        self.unit_price
            .checked_mul(u64::from(self.quantity))
            .ok_or(PricingError::Overflow)
    }
}

/// Buyer choices that influence the price.
#[derive(Debug, Clone, Copy)]
pub struct PricingOptions<'a> {
    /// Chosen shipping method.
    pub shipping_method: ShippingMethod,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Coupon code as typed by the buyer.
    pub coupon_code: Option<&'a str>,

    /// Instant used to decide coupon expiry.
    pub at: Timestamp,
}

/// Store-side inputs to pricing.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    /// Shipping and fee amounts.
    pub config: &'a PricingConfig,

    /// Coupons currently on file.
    pub coupons: &'a [Coupon],

    /// Gift campaign currently running, if any.
    pub campaign: Option<&'a GiftCampaign>,
}

/// What happened to the coupon code the buyer supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CouponOutcome {
    /// No code was supplied.
    NotProvided,

    /// The code was redeemed.
    Applied {
        /// Normalised code.
        code: String,
        /// Discount in basis points.
        percent_bps: u32,
    },

    /// The code was unknown, inactive or expired.
    Rejected {
        /// Code as supplied.
        code: String,
    },
}

impl CouponOutcome {
    /// Normalised code when applied.
    pub fn applied_code(&self) -> Option<&str> {
        match self {
            Self::Applied { code, .. } => Some(code),
            Self::NotProvided | Self::Rejected { .. } => None,
        }
    }
}

/// Authoritative price breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Sum of `unit_price * quantity`.
    pub items_total: u64,

    /// Coupon discount.
    pub discount: u64,

    /// `items_total - discount`.
    pub subtotal: u64,

    /// Shipping charged.
    pub shipping_cost: u64,

    /// Cash-on-delivery fee charged.
    pub cod_fee: u64,

    /// `subtotal + shipping_cost + cod_fee`.
    pub total: u64,

    /// Coupon result.
    pub coupon: CouponOutcome,

    /// Gift tiers unlocked by `items_total`.
    pub gift_tiers: Vec<GiftTier>,

    /// Next locked gift tier.
    pub next_gift_tier: Option<TierProgress>,
}

/// Price lines carrying fresh catalog data.
///
/// # Errors
///
/// - [`PricingError::EmptyCart`] when `lines` is empty.
/// - [`PricingError::ItemUnavailable`] for the first unavailable line.
/// - [`PricingError::Overflow`] when any amount overflows.
pub fn price_lines(
    lines: &[PricedLine],
    options: &PricingOptions<'_>,
    context: &PricingContext<'_>,
) -> Result<PriceBreakdown, PricingError> {
    if lines.is_empty() {
        return Err(PricingError::EmptyCart);
    }

    if let Some(line) = lines.iter().find(|line| !line.available) {
        return Err(PricingError::ItemUnavailable {
            variant_uuid: line.variant_uuid,
            product_name: line.product_name.clone(),
        });
    }

    let items_total = lines.iter().try_fold(0_u64, |acc, line| {
        acc.checked_add(line.line_total()?)
            .ok_or(PricingError::Overflow)
    })?;

    let shipping_cost = context
        .config
        .shipping_cost(items_total, options.shipping_method);

    let cod_fee = context.config.payment_fee(options.payment_method);

    let (discount, coupon) = match options.coupon_code {
        None => (0, CouponOutcome::NotProvided),
        Some(code) => match find_coupon(context.coupons, code, options.at) {
            Some(found) => (
                found.discount_on(items_total)?,
                CouponOutcome::Applied {
                    code: found.code().to_string(),
                    percent_bps: found.percent_bps(),
                },
            ),
            None => (
                0,
                CouponOutcome::Rejected {
                    code: code.to_string(),
                },
            ),
        },
    };

    let subtotal = items_total.saturating_sub(discount);

    let total = subtotal
        .checked_add(shipping_cost)
        .and_then(|total| total.checked_add(cod_fee))
        .ok_or(PricingError::Overflow)?;

    let (gift_tiers, next_gift_tier) = context.campaign.map_or_else(
        || (Vec::new(), None),
        |campaign| {
            (
                campaign.unlocked_tiers(items_total),
                campaign.next_tier(items_total),
            )
        },
    );

    Ok(PriceBreakdown {
        items_total,
        discount,
        subtotal,
        shipping_cost,
        cod_fee,
        total,
        coupon,
        gift_tiers,
        next_gift_tier,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const CONFIG: PricingConfig = PricingConfig {
        free_shipping_threshold: 2_000,
        standard_shipping_fee: 30,
        express_shipping_fee: 60,
        cod_fee: 10,
    };

    fn line(unit_price: u64, quantity: u32) -> PricedLine {
        PricedLine {
            product_uuid: Uuid::now_v7(),
            variant_uuid: Uuid::now_v7(),
            product_name: "Creatine".to_string(),
            variant_name: "300g".to_string(),
            unit_price,
            quantity,
            available: true,
        }
    }

    fn options(payment_method: PaymentMethod, coupon_code: Option<&str>) -> PricingOptions<'_> {
        PricingOptions {
            shipping_method: ShippingMethod::Standard,
            payment_method,
            coupon_code,
            at: Timestamp::now(),
        }
    }

    fn context<'a>(coupons: &'a [Coupon]) -> PricingContext<'a> {
        PricingContext {
            config: &CONFIG,
            coupons,
            campaign: None,
        }
    }

    #[test]
    fn cash_on_delivery_adds_shipping_and_fee_to_subtotal() -> TestResult {
        let breakdown = price_lines(
            &[line(500, 2), line(300, 1)],
            &options(PaymentMethod::CashOnDelivery, None),
            &context(&[]),
        )?;

        assert_eq!(breakdown.items_total, 1_300);
        assert_eq!(breakdown.subtotal, 1_300);
        assert_eq!(breakdown.shipping_cost, 30);
        assert_eq!(breakdown.cod_fee, 10);
        assert_eq!(breakdown.total, 1_340);

        Ok(())
    }

    #[test]
    fn card_payments_carry_no_fee() -> TestResult {
        let breakdown = price_lines(
            &[line(500, 1)],
            &options(PaymentMethod::CreditCard, None),
            &context(&[]),
        )?;

        assert_eq!(breakdown.cod_fee, 0);
        assert_eq!(breakdown.total, 530);

        Ok(())
    }

    #[test]
    fn express_uses_express_fee() -> TestResult {
        let breakdown = price_lines(
            &[line(500, 1)],
            &PricingOptions {
                shipping_method: ShippingMethod::Express,
                ..options(PaymentMethod::BankTransfer, None)
            },
            &context(&[]),
        )?;

        assert_eq!(breakdown.shipping_cost, 60);

        Ok(())
    }

    #[test]
    fn free_shipping_starts_exactly_at_threshold() -> TestResult {
        let at_threshold = price_lines(
            &[line(2_000, 1)],
            &options(PaymentMethod::CreditCard, None),
            &context(&[]),
        )?;

        let below_threshold = price_lines(
            &[line(1_999, 1)],
            &options(PaymentMethod::CreditCard, None),
            &context(&[]),
        )?;

        assert_eq!(at_threshold.shipping_cost, 0);
        assert_eq!(below_threshold.shipping_cost, 30);

        Ok(())
    }

    #[test]
    fn default_amounts_waive_every_shipping_method_at_threshold() {
        let config = PricingConfig::default();

        assert_eq!(config.free_shipping_threshold, 50_000);
        assert_eq!(config.shipping_cost(49_999, ShippingMethod::Standard), 2_990);
        assert_eq!(config.shipping_cost(49_999, ShippingMethod::Express), 4_990);
        assert_eq!(config.shipping_cost(50_000, ShippingMethod::Standard), 0);
        assert_eq!(config.shipping_cost(50_000, ShippingMethod::Express), 0);
        assert_eq!(config.payment_fee(PaymentMethod::CashOnDelivery), 1_500);
    }

    #[test]
    fn coupon_is_folded_into_subtotal_once() -> TestResult {
        let coupons = [Coupon::new("DUR5", 500)];

        let breakdown = price_lines(
            &[line(1_000, 1)],
            &options(PaymentMethod::CreditCard, Some("dur5")),
            &context(&coupons),
        )?;

        assert_eq!(breakdown.discount, 50);
        assert_eq!(breakdown.subtotal, 950);
        assert_eq!(
            breakdown.total,
            breakdown.subtotal + breakdown.shipping_cost + breakdown.cod_fee
        );
        assert_eq!(breakdown.coupon.applied_code(), Some("DUR5"));

        Ok(())
    }

    #[test]
    fn unknown_coupon_is_rejected_silently() -> TestResult {
        let coupons = [Coupon::new("DUR5", 500)];

        let breakdown = price_lines(
            &[line(1_000, 1)],
            &options(PaymentMethod::CreditCard, Some("NOPE")),
            &context(&coupons),
        )?;

        assert_eq!(breakdown.discount, 0);
        assert_eq!(breakdown.subtotal, 1_000);
        assert_eq!(
            breakdown.coupon,
            CouponOutcome::Rejected {
                code: "NOPE".to_string()
            }
        );

        Ok(())
    }

    #[test]
    fn unavailable_lines_fail_pricing() {
        let mut gone = line(100, 1);
        gone.available = false;

        let variant_uuid = gone.variant_uuid;

        let result = price_lines(
            &[line(100, 1), gone],
            &options(PaymentMethod::CreditCard, None),
            &context(&[]),
        );

        assert_eq!(
            result,
            Err(PricingError::ItemUnavailable {
                variant_uuid,
                product_name: "Creatine".to_string(),
            })
        );
    }

    #[test]
    fn empty_lines_fail_pricing() {
        let result = price_lines(
            &[],
            &options(PaymentMethod::CreditCard, None),
            &context(&[]),
        );

        assert_eq!(result, Err(PricingError::EmptyCart));
    }

    #[test]
    fn overflowing_lines_fail_pricing() {
        let result = price_lines(
            &[line(u64::MAX, 2)],
            &options(PaymentMethod::CreditCard, None),
            &context(&[]),
        );

        assert_eq!(result, Err(PricingError::Overflow));
    }

    #[test]
    fn gift_tiers_do_not_change_totals() -> TestResult {
        let campaign = GiftCampaign::new(
            Uuid::nil(),
            "Gifts".to_string(),
            vec![GiftTier {
                threshold: 1_000,
                reward: "Shaker".to_string(),
            }],
        );

        let breakdown = price_lines(
            &[line(1_000, 1)],
            &options(PaymentMethod::CreditCard, None),
            &PricingContext {
                campaign: Some(&campaign),
                ..context(&[])
            },
        )?;

        assert_eq!(breakdown.gift_tiers.len(), 1);
        assert_eq!(breakdown.total, 1_030);

        Ok(())
    }

    #[test]
    fn methods_parse_from_stored_names() -> TestResult {
        assert_eq!("express".parse::<ShippingMethod>()?, ShippingMethod::Express);
        assert_eq!(
            "cash-on-delivery".parse::<PaymentMethod>()?,
            PaymentMethod::CashOnDelivery
        );
        assert_eq!(
            PaymentMethod::BankTransfer.as_str().parse::<PaymentMethod>()?,
            PaymentMethod::BankTransfer
        );
        assert!("drone".parse::<ShippingMethod>().is_err());

        Ok(())
    }
}
