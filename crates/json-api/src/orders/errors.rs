//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::checkout::errors::pricing_status_error;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(_)
        | OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::VariantNotFound(_)
        | OrdersServiceError::ItemUnavailable { .. }
        | OrdersServiceError::InsufficientStock { .. }
        | OrdersServiceError::InvalidTransition(_)
        | OrdersServiceError::TrackingNotAllowed(_)
        | OrdersServiceError::AlreadyExists => StatusError::conflict().brief(error.to_string()),
        OrdersServiceError::OrderNumberCollision => {
            error!("order number retries exhausted");

            StatusError::service_unavailable().brief("Could not place the order, please retry")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Pricing(source) => pricing_status_error(source),
        OrdersServiceError::Sql(source) => {
            error!("order storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use storefront::orders::{OrderStatus, StatusTransitionError};
    use storefront_app::domain::{
        catalog::records::VariantUuid, orders::validation::ValidationError,
    };

    use super::*;

    #[test]
    fn insufficient_stock_is_a_conflict_naming_what_is_left() {
        let error = into_status_error(OrdersServiceError::InsufficientStock {
            variant_uuid: VariantUuid::new(),
            product_name: "Creatine".to_string(),
            variant_name: "300g".to_string(),
            requested: 3,
            remaining: 1,
        });

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "only 1 left of Creatine (300g), 3 requested");
    }

    #[test]
    fn validation_failures_are_bad_requests() {
        let error = into_status_error(ValidationError::TermsNotAccepted.into());

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn collisions_are_retryable() {
        let error = into_status_error(OrdersServiceError::OrderNumberCollision);

        assert_eq!(error.code, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn illegal_transitions_are_conflicts() {
        let error = into_status_error(
            StatusTransitionError::Invalid {
                from: OrderStatus::Delivered,
                to: OrderStatus::Pending,
            }
            .into(),
        );

        assert_eq!(error.code, StatusCode::CONFLICT);
    }
}
