//! Pricing service errors.

use storefront::pricing::PricingError;
use thiserror::Error;

use crate::domain::{
    catalog::records::{ProductUuid, VariantUuid},
    pricing::lines::LineError,
};

#[derive(Debug, Error)]
pub enum PricingServiceError {
    #[error(transparent)]
    InvalidLine(#[from] LineError),

    #[error("variant {0} not found")]
    VariantNotFound(VariantUuid),

    #[error("product {0} has no purchasable variant")]
    ProductUnavailable(ProductUuid),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
