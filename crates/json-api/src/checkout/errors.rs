//! Pricing Errors

use salvo::http::StatusError;
use storefront::pricing::PricingError;
use tracing::error;

use storefront_app::domain::pricing::PricingServiceError;

pub(crate) fn pricing_status_error(error: PricingError) -> StatusError {
    match error {
        PricingError::EmptyCart => StatusError::bad_request().brief(error.to_string()),
        PricingError::ItemUnavailable { .. } => StatusError::conflict().brief(error.to_string()),
        PricingError::Overflow | PricingError::Discount(_) => {
            error!("failed to price cart: {error}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn into_status_error(error: PricingServiceError) -> StatusError {
    match error {
        PricingServiceError::InvalidLine(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        PricingServiceError::VariantNotFound(_) | PricingServiceError::ProductUnavailable(_) => {
            StatusError::conflict().brief(error.to_string())
        }
        PricingServiceError::Pricing(source) => pricing_status_error(source),
        PricingServiceError::Sql(source) => {
            error!("failed to price cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
