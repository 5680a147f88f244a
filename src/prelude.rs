//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bundles::{BundleLine, BundleQuote, BundleRule, price_bundle},
    campaigns::{GiftCampaign, GiftTier, TierProgress},
    cart::{Cart, CartError, CartLine, CheckoutLine, MAX_LINE_QUANTITY},
    coupons::{Coupon, find_coupon},
    discounts::{DiscountError, percent_of_minor},
    money::{CURRENCY, CURRENCY_CODE, format_minor},
    orders::{OrderStatus, StatusTransitionError},
    pricing::{
        CouponOutcome, PaymentMethod, PriceBreakdown, PricedLine, PricingConfig, PricingContext,
        PricingError, PricingOptions, ShippingMethod, UnknownMethodError, price_lines,
    },
};
