//! Place Order Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::orders::{
    data::{CheckoutRequest, CustomerDetails, ShippingAddress},
    records::PlacedOrder,
};

use crate::{
    checkout::models::{
        CheckoutItemRequest, GiftTierResponse, PaymentMethodParam, ShippingMethodParam,
        checkout_lines,
    },
    extensions::*,
    orders::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressRequest {
    pub address_line: String,
    pub city: String,
    pub district: String,
    pub postal_code: Option<String>,
}

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutRequestBody {
    /// Signed-in buyer; omit for guest checkout
    pub user_uuid: Option<Uuid>,
    pub customer: CustomerRequest,
    pub address: AddressRequest,
    pub items: Vec<CheckoutItemRequest>,
    pub shipping_method: ShippingMethodParam,
    pub payment_method: PaymentMethodParam,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,

    #[serde(default)]
    pub accepted_terms: bool,

    #[serde(default)]
    pub accepted_privacy: bool,
}

impl CheckoutRequestBody {
    fn into_request(self, client_ip: Option<String>) -> CheckoutRequest {
        CheckoutRequest {
            user_uuid: self.user_uuid,
            customer: CustomerDetails {
                name: self.customer.name,
                email: self.customer.email,
                phone: self.customer.phone,
            },
            address: ShippingAddress {
                address_line: self.address.address_line,
                city: self.address.city,
                district: self.address.district,
                postal_code: self.address.postal_code,
            },
            items: checkout_lines(self.items),
            shipping_method: self.shipping_method.into(),
            payment_method: self.payment_method.into(),
            coupon_code: self.coupon_code,
            notes: self.notes,
            accepted_terms: self.accepted_terms,
            accepted_privacy: self.accepted_privacy,
            client_ip,
        }
    }
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutResponse {
    pub success: bool,
    pub order_number: String,
    pub total: u64,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub cod_fee: u64,
    pub discount: u64,

    /// Gift rewards the order qualified for
    pub gift_tiers: Vec<GiftTierResponse>,

    /// Card payment could not be started; the order stands and awaits payment
    pub payment_pending: bool,

    /// Hosted card checkout markup, card payments only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_html: Option<String>,
}

impl From<PlacedOrder> for CheckoutResponse {
    fn from(placed: PlacedOrder) -> Self {
        let payment_pending = placed.payment_pending();
        let payment_html = placed.payment_html().map(ToString::to_string);
        let order = placed.details.order;

        CheckoutResponse {
            success: true,
            order_number: order.order_number,
            total: order.total,
            subtotal: order.subtotal,
            shipping_cost: order.shipping_cost,
            cod_fee: order.cod_fee,
            discount: order.discount,
            gift_tiers: placed
                .breakdown
                .gift_tiers
                .into_iter()
                .map(Into::into)
                .collect(),
            payment_pending,
            payment_html,
        }
    }
}

/// Place Order Handler
///
/// Validates the cart, prices it from the catalog, reserves stock and records the order in one
/// transaction. Notifications and card payment start after the order is stored and never undo it.
#[endpoint(
    tags("checkout"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid checkout request"),
        (status_code = StatusCode::CONFLICT, description = "Item unavailable or out of stock"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Order number allocation failed, retry"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequestBody>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let client_ip = req
        .remote_addr()
        .clone()
        .into_std()
        .map(|addr| addr.ip().to_string());

    let placed = state
        .orders
        .place_order(json.into_inner().into_request(client_ip))
        .await
        .map_err(into_status_error)?;

    let response = CheckoutResponse::from(placed);

    info!(
        order_number = %response.order_number,
        total = response.total,
        payment_pending = response.payment_pending,
        "order placed"
    );

    res.add_header(LOCATION, format!("/orders/{}", response.order_number), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use storefront::{
        campaigns::GiftTier,
        cart::CheckoutLine,
        pricing::{PaymentMethod, ShippingMethod},
    };
    use storefront_app::domain::{
        catalog::records::VariantUuid,
        orders::{
            MockOrdersService, OrdersServiceError, side_effects::PaymentOutcome,
            validation::ValidationError,
        },
        payments::models::PaymentSession,
    };

    use crate::test_helpers::{ORDER_NUMBER, make_breakdown, make_order_details, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("checkout").post(handler))
    }

    fn body(variant_uuid: Uuid, payment_method: &str) -> Value {
        json!({
            "customer": {
                "name": "Ada Yilmaz",
                "email": "ada@example.com",
                "phone": "+90 532 000 00 00",
            },
            "address": {
                "addressLine": "Bagdat Cd. 1",
                "city": "Istanbul",
                "district": "Kadikoy",
            },
            "items": [{ "variantUuid": variant_uuid, "quantity": 2, "unitPrice": 1 }],
            "shippingMethod": "standard",
            "paymentMethod": payment_method,
            "acceptedTerms": true,
            "acceptedPrivacy": true,
        })
    }

    fn placed(payment: PaymentOutcome) -> PlacedOrder {
        let mut breakdown = make_breakdown();
        breakdown.gift_tiers = vec![GiftTier {
            threshold: 1_000,
            reward: "Shaker".to_string(),
        }];

        PlacedOrder {
            details: make_order_details(),
            breakdown,
            payment,
        }
    }

    #[tokio::test]
    async fn test_place_cash_on_delivery_order() -> TestResult {
        let variant_uuid = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .withf(move |request| {
                request.items
                    == vec![CheckoutLine {
                        variant_uuid,
                        quantity: 2,
                    }]
                    && request.payment_method == PaymentMethod::CashOnDelivery
                    && request.shipping_method == ShippingMethod::Standard
                    && request.user_uuid.is_none()
                    && request.accepted_terms
                    && request.accepted_privacy
            })
            .return_once(|_| Ok(placed(PaymentOutcome::NotRequired)));

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&body(variant_uuid, "cash-on-delivery"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(location, Some(format!("/orders/{ORDER_NUMBER}").as_str()));

        let body: Value = res.take_json().await?;

        assert_eq!(body["success"], true);
        assert_eq!(body["orderNumber"], ORDER_NUMBER);
        assert_eq!(body["subtotal"], 1_300);
        assert_eq!(body["shippingCost"], 30);
        assert_eq!(body["codFee"], 10);
        assert_eq!(body["total"], 1_340);
        assert_eq!(body["giftTiers"][0]["reward"], "Shaker");
        assert_eq!(body["paymentPending"], false);
        assert!(body.get("paymentHtml").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_card_order_returns_payment_html() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().once().return_once(|_| {
            Ok(placed(PaymentOutcome::Initialized(PaymentSession {
                token: "tok".to_string(),
                checkout_form_html: "<form></form>".to_string(),
            })))
        });

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&body(Uuid::now_v7(), "credit_card"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: CheckoutResponse = res.take_json().await?;

        assert_eq!(body.payment_html.as_deref(), Some("<form></form>"));
        assert!(!body.payment_pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_failed_card_initialisation_still_places_order() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .return_once(|_| Ok(placed(PaymentOutcome::Failed)));

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&body(Uuid::now_v7(), "credit_card"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: CheckoutResponse = res.take_json().await?;

        assert!(body.success);
        assert!(body.payment_pending);
        assert_eq!(body.payment_html, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_consent_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .withf(|request| !request.accepted_terms)
            .return_once(|_| Err(ValidationError::TermsNotAccepted.into()));

        let mut request = body(Uuid::now_v7(), "bank_transfer");

        if let Some(fields) = request.as_object_mut() {
            fields.remove("acceptedTerms");
        }

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&request)
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(res.take_string().await?.contains("must both be accepted"));

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_409_with_remaining_count() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_place_order().once().return_once(|_| {
            Err(OrdersServiceError::InsufficientStock {
                variant_uuid: VariantUuid::new(),
                product_name: "Creatine".to_string(),
                variant_name: "300g".to_string(),
                requested: 2,
                remaining: 1,
            })
        });

        let mut res = TestClient::post("http://example.com/checkout")
            .json(&body(Uuid::now_v7(), "cash_on_delivery"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert!(res.take_string().await?.contains("only 1 left of Creatine"));

        Ok(())
    }

    #[tokio::test]
    async fn test_order_number_collision_returns_503() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_place_order()
            .once()
            .return_once(|_| Err(OrdersServiceError::OrderNumberCollision));

        let res = TestClient::post("http://example.com/checkout")
            .json(&body(Uuid::now_v7(), "cash_on_delivery"))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
