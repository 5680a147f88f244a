//! Quote Bundle Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::bundles::BundleQuote;

use crate::{checkout::errors::into_status_error, extensions::*};

/// Quote Bundle Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BundleQuoteRequest {
    /// Selected products; duplicates count once
    pub product_uuids: Vec<Uuid>,
}

/// Bundle Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BundleQuoteResponse {
    /// Sum of each product's first variant price
    pub items_total: u64,
    pub discount: u64,
    pub total: u64,

    /// Whether the bundle is large enough for the discount
    pub eligible: bool,

    /// Products still needed for the discount
    pub missing_items: usize,
}

impl From<BundleQuote> for BundleQuoteResponse {
    fn from(quote: BundleQuote) -> Self {
        BundleQuoteResponse {
            items_total: quote.items_total,
            discount: quote.discount,
            total: quote.total,
            eligible: quote.eligible,
            missing_items: quote.missing_items,
        }
    }
}

/// Quote Bundle Handler
#[endpoint(
    tags("bundles"),
    summary = "Quote Bundle",
    responses(
        (status_code = StatusCode::OK, description = "Bundle priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "No products selected"),
        (status_code = StatusCode::CONFLICT, description = "A product has no purchasable variant"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BundleQuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<BundleQuoteResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let products = json.into_inner().product_uuids;

    if products.is_empty() {
        return Err(StatusError::bad_request().brief("At least one product is required"));
    }

    let quote = state
        .pricing
        .quote_bundle(products.into_iter().map(Into::into).collect())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
