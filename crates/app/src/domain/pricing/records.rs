//! Pricing Records

use storefront::{
    campaigns::GiftCampaign,
    cart::CheckoutLine,
    coupons::Coupon,
    pricing::{PricedLine, PricingConfig, PricingContext},
};

use crate::domain::catalog::records::{ProductUuid, VariantUuid};

/// A variant joined with its product, as read for pricing and checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantLineRecord {
    pub variant_uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub variant_name: String,
    pub price: u64,
    pub stock: u32,
    /// Variant and product are both active.
    pub is_available: bool,
}

impl VariantLineRecord {
    /// Price a requested line with this record's fresh state.
    #[must_use]
    pub fn priced(&self, requested: CheckoutLine) -> PricedLine {
        PricedLine {
            product_uuid: self.product_uuid.into_uuid(),
            variant_uuid: self.variant_uuid.into_uuid(),
            product_name: self.product_name.clone(),
            variant_name: self.variant_name.clone(),
            unit_price: self.price,
            quantity: requested.quantity,
            available: self.is_available,
        }
    }
}

/// Store-side pricing inputs read alongside the lines.
#[derive(Debug, Clone, Default)]
pub struct PricingInputs {
    pub coupons: Vec<Coupon>,
    pub campaign: Option<GiftCampaign>,
}

impl PricingInputs {
    /// Borrow as an engine context.
    #[must_use]
    pub fn context<'a>(&'a self, config: &'a PricingConfig) -> PricingContext<'a> {
        PricingContext {
            config,
            coupons: &self.coupons,
            campaign: self.campaign.as_ref(),
        }
    }
}
