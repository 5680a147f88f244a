//! App Router

use salvo::Router;

use crate::{admin, bundles, checkout, healthcheck, orders, products, variants};

/// Public storefront routes plus the token-guarded admin tree.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{slug}").get(products::get::handler)),
        )
        .push(
            Router::with_path("checkout")
                .post(checkout::place::handler)
                .push(Router::with_path("quote").post(checkout::quote::handler)),
        )
        .push(Router::with_path("bundles/quote").post(bundles::quote::handler))
        .push(Router::with_path("orders/{order_number}").get(orders::get::handler))
        .push(admin_router())
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(admin::middleware::handler)
        .push(
            Router::with_path("orders").get(orders::index::handler).push(
                Router::with_path("{order_number}")
                    .push(Router::with_path("status").put(orders::status::handler))
                    .push(Router::with_path("tracking").put(orders::tracking::handler)),
            ),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .push(Router::with_path("variants").post(products::variants::handler))
                        .push(Router::with_path("active").put(products::active::handler)),
                ),
        )
        .push(
            Router::with_path("variants/{variant}")
                .push(Router::with_path("stock").put(variants::stock::handler))
                .push(Router::with_path("active").put(variants::active::handler)),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrdersServiceError};

    use crate::{
        state::State,
        test_helpers::{strict_state, with_admin_token},
    };

    use super::*;

    fn make_service(state: State) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(Arc::new(state)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_healthcheck_is_public() -> TestResult {
        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(strict_state()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(res.take_string().await?.contains("ok"));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_require_token() {
        let res = TestClient::get("http://example.com/admin/orders")
            .send(&make_service(strict_state()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_guest_lookup_and_admin_listing_share_the_orders_service() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order_by_number()
            .once()
            .return_once(|_| Err(OrdersServiceError::NotFound));

        orders.expect_list_orders().once().return_once(|_| Ok(Vec::new()));

        let service = make_service(State {
            orders: Arc::new(orders),
            ..strict_state()
        });

        let lookup = TestClient::get("http://example.com/orders/SN-20260301-ABCDEF")
            .send(&service)
            .await;

        let listing = with_admin_token(TestClient::get("http://example.com/admin/orders"))
            .send(&service)
            .await;

        assert_eq!(lookup.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(listing.status_code, Some(StatusCode::OK));
    }
}
