//! Quote Checkout Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::pricing::PricedLine;
use storefront_app::domain::pricing::data::QuoteRequest;

use crate::{
    checkout::{
        errors::{into_status_error, pricing_status_error},
        models::{
            BreakdownResponse, CheckoutItemRequest, PaymentMethodParam, ShippingMethodParam,
            checkout_lines,
        },
    },
    extensions::*,
};

/// Quote Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteRequestBody {
    pub items: Vec<CheckoutItemRequest>,
    pub shipping_method: ShippingMethodParam,
    pub payment_method: PaymentMethodParam,
    pub coupon_code: Option<String>,
}

impl From<QuoteRequestBody> for QuoteRequest {
    fn from(body: QuoteRequestBody) -> Self {
        QuoteRequest {
            items: checkout_lines(body.items),
            shipping_method: body.shipping_method.into(),
            payment_method: body.payment_method.into(),
            coupon_code: body.coupon_code,
        }
    }
}

/// Priced Line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteLineResponse {
    pub product_uuid: Uuid,
    pub variant_uuid: Uuid,
    pub product_name: String,
    pub variant_name: String,

    /// Current catalog price
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

impl QuoteLineResponse {
    fn from_line(line: PricedLine) -> Result<Self, StatusError> {
        let line_total = line.line_total().map_err(pricing_status_error)?;

        Ok(QuoteLineResponse {
            product_uuid: line.product_uuid,
            variant_uuid: line.variant_uuid,
            product_name: line.product_name,
            variant_name: line.variant_name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total,
        })
    }
}

/// Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteResponse {
    pub lines: Vec<QuoteLineResponse>,
    pub breakdown: BreakdownResponse,
}

/// Quote Checkout Handler
///
/// Prices a cart from current catalog state without reserving stock.
#[endpoint(
    tags("checkout"),
    summary = "Quote Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Cart priced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid cart"),
        (status_code = StatusCode::CONFLICT, description = "Item unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<QuoteRequestBody>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let quote = state
        .pricing
        .quote(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let lines = quote
        .lines
        .into_iter()
        .map(QuoteLineResponse::from_line)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(QuoteResponse {
        lines,
        breakdown: quote.breakdown.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront::{
        cart::CheckoutLine,
        pricing::{PaymentMethod, PricingError, ShippingMethod},
    };
    use storefront_app::domain::pricing::{
        MockPricingService, PricingServiceError, data::PriceQuote, lines::LineError,
    };

    use crate::test_helpers::{make_breakdown, pricing_service};

    use super::*;

    fn make_service(pricing: MockPricingService) -> Service {
        pricing_service(pricing, Router::with_path("checkout/quote").post(handler))
    }

    fn priced_line(variant_uuid: Uuid, unit_price: u64, quantity: u32) -> PricedLine {
        PricedLine {
            product_uuid: Uuid::now_v7(),
            variant_uuid,
            product_name: "Whey Isolate".to_string(),
            variant_name: "Vanilla 2kg".to_string(),
            unit_price,
            quantity,
            available: true,
        }
    }

    #[tokio::test]
    async fn test_quote_prices_from_catalog() -> TestResult {
        let whey = Uuid::now_v7();
        let bcaa = Uuid::now_v7();

        let mut pricing = MockPricingService::new();

        pricing
            .expect_quote()
            .once()
            .withf(move |request| {
                *request
                    == QuoteRequest {
                        items: vec![
                            CheckoutLine {
                                variant_uuid: whey,
                                quantity: 2,
                            },
                            CheckoutLine {
                                variant_uuid: bcaa,
                                quantity: 1,
                            },
                        ],
                        shipping_method: ShippingMethod::Standard,
                        payment_method: PaymentMethod::CashOnDelivery,
                        coupon_code: None,
                    }
            })
            .return_once(move |_| {
                Ok(PriceQuote {
                    lines: vec![priced_line(whey, 500, 2), priced_line(bcaa, 300, 1)],
                    breakdown: make_breakdown(),
                })
            });

        let mut res = TestClient::post("http://example.com/checkout/quote")
            .json(&json!({
                "items": [
                    { "variantUuid": whey, "quantity": 2, "unitPrice": 1 },
                    { "variantUuid": bcaa, "quantity": 1 },
                ],
                "shippingMethod": "standard",
                "paymentMethod": "cash_on_delivery",
            }))
            .send(&make_service(pricing))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(body["lines"][0]["lineTotal"], 1_000);
        assert_eq!(body["lines"][1]["unitPrice"], 300);
        assert_eq!(body["breakdown"]["subtotal"], 1_300);
        assert_eq!(body["breakdown"]["codFee"], 10);
        assert_eq!(body["breakdown"]["total"], 1_340);

        Ok(())
    }

    #[tokio::test]
    async fn test_quote_empty_cart_returns_400() -> TestResult {
        let mut pricing = MockPricingService::new();

        pricing
            .expect_quote()
            .once()
            .return_once(|_| Err(PricingServiceError::InvalidLine(LineError::Empty)));

        let res = TestClient::post("http://example.com/checkout/quote")
            .json(&json!({
                "items": [],
                "shippingMethod": "express",
                "paymentMethod": "credit_card",
            }))
            .send(&make_service(pricing))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_quote_unavailable_item_returns_409() -> TestResult {
        let variant_uuid = Uuid::now_v7();

        let mut pricing = MockPricingService::new();

        pricing.expect_quote().once().return_once(move |_| {
            Err(PricingServiceError::Pricing(PricingError::ItemUnavailable {
                variant_uuid,
                product_name: "BCAA".to_string(),
            }))
        });

        let res = TestClient::post("http://example.com/checkout/quote")
            .json(&json!({
                "items": [{ "variantUuid": variant_uuid, "quantity": 1 }],
                "shippingMethod": "standard",
                "paymentMethod": "bank_transfer",
            }))
            .send(&make_service(pricing))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_quote_unknown_payment_method_returns_400() -> TestResult {
        let mut pricing = MockPricingService::new();

        pricing.expect_quote().never();

        let res = TestClient::post("http://example.com/checkout/quote")
            .json(&json!({
                "items": [{ "variantUuid": Uuid::now_v7(), "quantity": 1 }],
                "shippingMethod": "standard",
                "paymentMethod": "barter",
            }))
            .send(&make_service(pricing))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
