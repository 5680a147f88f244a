//! Restock Variant Handler

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
    products::{errors::into_status_error, models::VariantResponse},
};

/// Restock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RestockRequest {
    /// Units to add
    pub quantity: u32,
}

/// Restock Variant Handler
///
/// Adds units to a variant's stock.
#[endpoint(
    tags("admin"),
    summary = "Restock Variant",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity must be positive"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    variant: PathParam<Uuid>,
    json: JsonBody<RestockRequest>,
    depot: &mut Depot,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let quantity = json.into_inner().quantity;

    if quantity == 0 {
        return Err(StatusError::bad_request().brief("Quantity must be positive"));
    }

    let variant = state
        .catalog
        .restock_variant(variant.into_inner().into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(variant.into()))
}
