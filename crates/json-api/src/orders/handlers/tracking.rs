//! Set Tracking Number Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderSummaryResponse},
};

/// Set Tracking Number Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackingRequest {
    /// Courier tracking number
    pub tracking_number: String,
}

/// Set Tracking Number Handler
#[endpoint(
    tags("admin"),
    summary = "Set Tracking Number",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tracking number set"),
        (status_code = StatusCode::BAD_REQUEST, description = "Blank tracking number"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is not being fulfilled"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order_number: PathParam<String>,
    json: JsonBody<TrackingRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderSummaryResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let tracking_number = json.into_inner().tracking_number;

    if tracking_number.trim().is_empty() {
        return Err(StatusError::bad_request().brief("Tracking number is required"));
    }

    let order = state
        .orders
        .set_tracking_number(order_number.into_inner().trim(), &tracking_number)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
