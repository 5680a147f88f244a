//! Get Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
};

/// Get Order Handler
///
/// Guest order lookup. The order number is the only credential.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order_number: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let details = state
        .orders
        .get_order_by_number(order_number.into_inner().trim())
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
