//! Pricing Config

use clap::Args;
use storefront::pricing::PricingConfig;

/// Shipping and fee amounts, in minor units.
#[derive(Debug, Args)]
pub struct PricingSettings {
    /// Items total at or above which shipping is free for every method
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value_t = 50_000_u64)]
    pub free_shipping_threshold: u64,

    /// Standard shipping fee below the threshold
    #[arg(long, env = "STANDARD_SHIPPING_FEE", default_value_t = 2_990_u64)]
    pub standard_shipping_fee: u64,

    /// Express shipping fee below the threshold
    #[arg(long, env = "EXPRESS_SHIPPING_FEE", default_value_t = 4_990_u64)]
    pub express_shipping_fee: u64,

    /// Cash-on-delivery fee
    #[arg(long, env = "COD_FEE", default_value_t = 1_500_u64)]
    pub cod_fee: u64,
}

impl PricingSettings {
    #[must_use]
    pub fn to_pricing_config(&self) -> PricingConfig {
        PricingConfig {
            free_shipping_threshold: self.free_shipping_threshold,
            standard_shipping_fee: self.standard_shipping_fee,
            express_shipping_fee: self.express_shipping_fee,
            cod_fee: self.cod_fee,
        }
    }
}
