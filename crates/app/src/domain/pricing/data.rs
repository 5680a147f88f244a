//! Pricing Data

use storefront::{
    cart::CheckoutLine,
    pricing::{PaymentMethod, PriceBreakdown, PricedLine, ShippingMethod},
};

/// A cart to price without placing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub items: Vec<CheckoutLine>,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
}

/// Lines as priced from the catalog, with the breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub lines: Vec<PricedLine>,
    pub breakdown: PriceBreakdown,
}
