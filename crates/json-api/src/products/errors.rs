//! Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product or variant already exists")
        }
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid catalog payload")
        }
        CatalogServiceError::NotFound => StatusError::not_found(),
        CatalogServiceError::Sql(source) => {
            error!("catalog storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
