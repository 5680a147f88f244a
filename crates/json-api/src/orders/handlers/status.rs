//! Update Order Status Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront::orders::OrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderSummaryResponse},
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateStatusRequest {
    /// Target status
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves an order along its lifecycle. Cancelling returns the order's stock.
#[endpoint(
    tags("admin"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order_number: PathParam<String>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderSummaryResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .or_400("Unknown order status")?;

    let order = state
        .orders
        .update_status(order_number.into_inner().trim(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
