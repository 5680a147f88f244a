//! Order Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront::orders::OrderStatus;
use storefront_app::domain::orders::data::OrderFilter;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderSummaryResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Orders, newest first
    pub orders: Vec<OrderSummaryResponse>,
}

fn order_filter(
    status: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<OrderFilter, StatusError> {
    let defaults = OrderFilter::default();

    let status = status
        .as_deref()
        .map(str::parse::<OrderStatus>)
        .transpose()
        .or_400("Unknown order status")?;

    Ok(OrderFilter {
        status,
        limit: limit
            .unwrap_or(defaults.limit)
            .clamp(1, OrderFilter::MAX_LIMIT),
        offset: offset.unwrap_or(defaults.offset),
    })
}

/// Order Index Handler
///
/// Lists orders for fulfilment, optionally filtered by status.
#[endpoint(
    tags("admin"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders listed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let filter = order_filter(status.into_inner(), limit.into_inner(), offset.into_inner())?;

    let orders = state
        .orders
        .list_orders(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::MockOrdersService;

    use crate::test_helpers::{admin, make_order, orders_service, with_admin_token};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, admin(Router::with_path("admin/orders").get(handler)))
    }

    #[test]
    fn filter_clamps_limit_and_parses_status() -> TestResult {
        let filter = order_filter(Some("shipped".to_string()), Some(10_000), None)?;

        assert_eq!(
            filter,
            OrderFilter {
                status: Some(OrderStatus::Shipped),
                limit: OrderFilter::MAX_LIMIT,
                offset: 0,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_filters_by_status() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .withf(|filter| {
                *filter
                    == OrderFilter {
                        status: Some(OrderStatus::Confirmed),
                        limit: 20,
                        offset: 40,
                    }
            })
            .return_once(|_| Ok(vec![make_order(OrderStatus::Confirmed)]));

        let mut res = with_admin_token(TestClient::get(
            "http://example.com/admin/orders?status=confirmed&limit=20&offset=40",
        ))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrdersResponse = res.take_json().await?;

        assert_eq!(body.orders.len(), 1);
        assert_eq!(
            body.orders.first().map(|order| order.status.as_str()),
            Some("confirmed")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_unknown_status_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = with_admin_token(TestClient::get(
            "http://example.com/admin/orders?status=lost",
        ))
        .send(&make_service(orders))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_without_token_returns_401() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
