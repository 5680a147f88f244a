//! Checkout Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::{
    cart::CheckoutLine,
    campaigns::{GiftTier, TierProgress},
    pricing::{CouponOutcome, PaymentMethod, PriceBreakdown, ShippingMethod},
};
use uuid::Uuid;

/// Delivery speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ShippingMethodParam {
    Standard,
    Express,
}

impl From<ShippingMethodParam> for ShippingMethod {
    fn from(method: ShippingMethodParam) -> Self {
        match method {
            ShippingMethodParam::Standard => ShippingMethod::Standard,
            ShippingMethodParam::Express => ShippingMethod::Express,
        }
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PaymentMethodParam {
    #[serde(alias = "cash-on-delivery")]
    CashOnDelivery,
    CreditCard,
    BankTransfer,
}

impl From<PaymentMethodParam> for PaymentMethod {
    fn from(method: PaymentMethodParam) -> Self {
        match method {
            PaymentMethodParam::CashOnDelivery => PaymentMethod::CashOnDelivery,
            PaymentMethodParam::CreditCard => PaymentMethod::CreditCard,
            PaymentMethodParam::BankTransfer => PaymentMethod::BankTransfer,
        }
    }
}

/// A cart line as submitted. Only the variant and quantity are read; prices always come from
/// the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutItemRequest {
    pub variant_uuid: Uuid,
    pub quantity: u32,

    /// Cart snapshot, accepted and ignored
    #[serde(default, alias = "productId")]
    pub product_uuid: Option<Uuid>,

    /// Cart snapshot, accepted and ignored
    #[serde(default)]
    pub product_name: Option<String>,

    /// Cart snapshot, accepted and ignored
    #[serde(default)]
    pub variant_name: Option<String>,

    /// Price the cart displayed; never charged
    #[serde(default)]
    pub unit_price: Option<u64>,
}

impl From<CheckoutItemRequest> for CheckoutLine {
    fn from(item: CheckoutItemRequest) -> Self {
        CheckoutLine {
            variant_uuid: item.variant_uuid,
            quantity: item.quantity,
        }
    }
}

pub(crate) fn checkout_lines(items: Vec<CheckoutItemRequest>) -> Vec<CheckoutLine> {
    items.into_iter().map(Into::into).collect()
}

/// Gift tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GiftTierResponse {
    /// Subtotal that unlocks the reward
    pub threshold: u64,

    /// Reward description
    pub reward: String,
}

impl From<GiftTier> for GiftTierResponse {
    fn from(tier: GiftTier) -> Self {
        GiftTierResponse {
            threshold: tier.threshold,
            reward: tier.reward,
        }
    }
}

/// Progress towards the next gift tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TierProgressResponse {
    pub tier: GiftTierResponse,

    /// Amount still to spend
    pub remaining: u64,
}

impl From<TierProgress> for TierProgressResponse {
    fn from(progress: TierProgress) -> Self {
        TierProgressResponse {
            tier: progress.tier.into(),
            remaining: progress.remaining,
        }
    }
}

/// Price breakdown, in minor currency units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BreakdownResponse {
    pub items_total: u64,
    pub discount: u64,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub cod_fee: u64,
    pub total: u64,

    /// Coupon code that was applied, normalised
    pub coupon_code: Option<String>,

    /// Set when a supplied coupon code was not accepted
    pub coupon_rejected: bool,

    pub gift_tiers: Vec<GiftTierResponse>,
    pub next_gift_tier: Option<TierProgressResponse>,
}

impl From<PriceBreakdown> for BreakdownResponse {
    fn from(breakdown: PriceBreakdown) -> Self {
        BreakdownResponse {
            coupon_code: breakdown.coupon.applied_code().map(ToString::to_string),
            coupon_rejected: matches!(breakdown.coupon, CouponOutcome::Rejected { .. }),
            items_total: breakdown.items_total,
            discount: breakdown.discount,
            subtotal: breakdown.subtotal,
            shipping_cost: breakdown.shipping_cost,
            cod_fee: breakdown.cod_fee,
            total: breakdown.total,
            gift_tiers: breakdown.gift_tiers.into_iter().map(Into::into).collect(),
            next_gift_tier: breakdown.next_gift_tier.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn payment_methods_accept_the_hyphenated_cash_spelling() -> TestResult {
        let method: PaymentMethodParam = serde_json::from_value(json!("cash-on-delivery"))?;

        assert_eq!(PaymentMethod::from(method), PaymentMethod::CashOnDelivery);

        Ok(())
    }

    #[test]
    fn cart_snapshot_fields_are_accepted_but_not_priced() -> TestResult {
        let variant = Uuid::now_v7();

        let items: Vec<CheckoutItemRequest> = serde_json::from_value(json!([{
            "productId": Uuid::now_v7(),
            "variantUuid": variant,
            "productName": "Whey Isolate",
            "variantName": "Vanilla 2kg",
            "unitPrice": 1,
            "quantity": 2,
        }]))?;

        assert_eq!(items.first().and_then(|item| item.unit_price), Some(1));
        assert_eq!(
            checkout_lines(items),
            vec![CheckoutLine {
                variant_uuid: variant,
                quantity: 2,
            }]
        );

        Ok(())
    }

    #[test]
    fn rejected_coupons_are_flagged_without_a_code() {
        let breakdown = PriceBreakdown {
            items_total: 1_000,
            discount: 0,
            subtotal: 1_000,
            shipping_cost: 30,
            cod_fee: 0,
            total: 1_030,
            coupon: CouponOutcome::Rejected {
                code: "NOPE".to_string(),
            },
            gift_tiers: Vec::new(),
            next_gift_tier: None,
        };

        let response = BreakdownResponse::from(breakdown);

        assert!(response.coupon_rejected);
        assert_eq!(response.coupon_code, None);
    }
}
