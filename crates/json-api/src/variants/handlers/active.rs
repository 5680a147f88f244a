//! Set Variant Active Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{active::ActiveRequest, errors::into_status_error, models::VariantResponse},
};

/// Set Variant Active Handler
///
/// Inactive variants cannot be quoted or ordered.
#[endpoint(
    tags("admin"),
    summary = "Set Variant Active",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Variant updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Variant not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    variant: PathParam<Uuid>,
    json: JsonBody<ActiveRequest>,
    depot: &mut Depot,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let variant = state
        .catalog
        .set_variant_active(variant.into_inner().into(), json.into_inner().is_active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(variant.into()))
}
