//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use storefront::{
    orders::{OrderStatus, StatusTransitionError},
    pricing::PricingError,
};
use thiserror::Error;

use crate::domain::{catalog::records::VariantUuid, orders::validation::ValidationError};

/// Unique constraint guarding order numbers.
pub(crate) const ORDER_NUMBER_CONSTRAINT: &str = "orders_order_number_key";

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("variant {0} not found")]
    VariantNotFound(VariantUuid),

    #[error("{product_name} is no longer available")]
    ItemUnavailable {
        variant_uuid: VariantUuid,
        product_name: String,
    },

    #[error("only {remaining} left of {product_name} ({variant_name}), {requested} requested")]
    InsufficientStock {
        variant_uuid: VariantUuid,
        product_name: String,
        variant_name: String,
        requested: u32,
        remaining: u32,
    },

    #[error("could not allocate a unique order number")]
    OrderNumberCollision,

    #[error("order not found")]
    NotFound,

    #[error(transparent)]
    InvalidTransition(#[from] StatusTransitionError),

    #[error("tracking numbers can only be set while preparing or shipped, order is {0}")]
    TrackingNotAllowed(OrderStatus),

    #[error(transparent)]
    Pricing(PricingError),

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        match database_error.kind() {
            ErrorKind::UniqueViolation
                if database_error.constraint() == Some(ORDER_NUMBER_CONSTRAINT) =>
            {
                Self::OrderNumberCollision
            }
            ErrorKind::UniqueViolation => Self::AlreadyExists,
            ErrorKind::ForeignKeyViolation => Self::InvalidReference,
            ErrorKind::NotNullViolation => Self::MissingRequiredData,
            ErrorKind::CheckViolation => Self::InvalidData,
            ErrorKind::Other | _ => Self::Sql(error),
        }
    }
}

impl From<PricingError> for OrdersServiceError {
    fn from(error: PricingError) -> Self {
        match error {
            PricingError::ItemUnavailable {
                variant_uuid,
                product_name,
            } => Self::ItemUnavailable {
                variant_uuid: VariantUuid::from_uuid(variant_uuid),
                product_name,
            },
            other => Self::Pricing(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn unavailable_items_keep_their_identity() {
        let variant_uuid = Uuid::now_v7();

        let error = OrdersServiceError::from(PricingError::ItemUnavailable {
            variant_uuid,
            product_name: "Whey".to_string(),
        });

        assert!(
            matches!(
                error,
                OrdersServiceError::ItemUnavailable { variant_uuid: v, .. } if v.into_uuid() == variant_uuid
            ),
            "got {error:?}"
        );
    }

    #[test]
    fn insufficient_stock_message_names_the_remaining_count() {
        let error = OrdersServiceError::InsufficientStock {
            variant_uuid: VariantUuid::new(),
            product_name: "Creatine".to_string(),
            variant_name: "300g".to_string(),
            requested: 2,
            remaining: 1,
        };

        assert_eq!(
            error.to_string(),
            "only 1 left of Creatine (300g), 2 requested"
        );
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            OrdersServiceError::from(Error::RowNotFound),
            OrdersServiceError::NotFound
        ));
    }
}
