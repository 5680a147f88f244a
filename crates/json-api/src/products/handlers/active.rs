//! Set Product Active Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
};

/// Activation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActiveRequest {
    pub is_active: bool,
}

/// Set Product Active Handler
///
/// Inactive products disappear from the storefront and can no longer be ordered. Placed orders
/// keep their snapshot.
#[endpoint(
    tags("admin"),
    summary = "Set Product Active",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ActiveRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let product = state
        .catalog
        .set_product_active(product.into_inner().into(), json.into_inner().is_active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
