//! Get Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductDetailsResponse},
};

/// Get Product Handler
///
/// Returns an active product with its active variants.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let details = state
        .catalog
        .get_product_by_slug(&slug.into_inner(), true)
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
