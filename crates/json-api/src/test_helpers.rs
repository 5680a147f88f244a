//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, http::header::AUTHORIZATION, prelude::*, test::RequestBuilder};
use storefront::{
    orders::OrderStatus,
    pricing::{CouponOutcome, PaymentMethod, PriceBreakdown, ShippingMethod},
};
use storefront_app::domain::{
    catalog::{
        MockCatalogService,
        records::{ProductRecord, ProductUuid, VariantRecord, VariantUuid},
    },
    orders::{
        MockOrdersService,
        data::{CustomerDetails, ShippingAddress},
        records::{OrderDetails, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
    },
    pricing::MockPricingService,
};

use crate::{admin, state::State};

pub(crate) const ADMIN_TOKEN: &str = "test-admin-token";

pub(crate) const ORDER_NUMBER: &str = "SN-20260301-ABCDEF";

/// State whose services panic on any call.
pub(crate) fn strict_state() -> State {
    State {
        catalog: Arc::new(MockCatalogService::new()),
        pricing: Arc::new(MockPricingService::new()),
        orders: Arc::new(MockOrdersService::new()),
        admin_token_sha256: Some(admin::middleware::hash_token(ADMIN_TOKEN)),
    }
}

fn service(state: State, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(Arc::new(state))).push(route))
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    service(
        State {
            catalog: Arc::new(catalog),
            ..strict_state()
        },
        route,
    )
}

pub(crate) fn pricing_service(pricing: MockPricingService, route: Router) -> Service {
    service(
        State {
            pricing: Arc::new(pricing),
            ..strict_state()
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        State {
            orders: Arc::new(orders),
            ..strict_state()
        },
        route,
    )
}

/// Wrap `route` behind the admin token check.
pub(crate) fn admin(route: Router) -> Router {
    Router::new().hoop(admin::middleware::handler).push(route)
}

pub(crate) fn with_admin_token(request: RequestBuilder) -> RequestBuilder {
    request.add_header(AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"), true)
}

pub(crate) fn make_product(uuid: ProductUuid, slug: &str) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Whey Isolate".to_string(),
        slug: slug.to_string(),
        description: String::new(),
        brand_uuid: None,
        category_uuid: None,
        base_price: 89_900,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_variant(uuid: VariantUuid, product_uuid: ProductUuid, stock: u32) -> VariantRecord {
    VariantRecord {
        uuid,
        product_uuid,
        sku: "WHEY-VAN-2KG".to_string(),
        name: "Vanilla 2kg".to_string(),
        size: Some("2kg".to_string()),
        flavor: Some("Vanilla".to_string()),
        price: 89_900,
        stock,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Breakdown for two units at 500 and one at 300, COD, standard shipping.
pub(crate) fn make_breakdown() -> PriceBreakdown {
    PriceBreakdown {
        items_total: 1_300,
        discount: 0,
        subtotal: 1_300,
        shipping_cost: 30,
        cod_fee: 10,
        total: 1_340,
        coupon: CouponOutcome::NotProvided,
        gift_tiers: Vec::new(),
        next_gift_tier: None,
    }
}

pub(crate) fn make_order(status: OrderStatus) -> OrderRecord {
    let breakdown = make_breakdown();

    OrderRecord {
        uuid: OrderUuid::new(),
        order_number: ORDER_NUMBER.to_string(),
        user_uuid: None,
        status,
        customer: CustomerDetails {
            name: "Ada Yilmaz".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+90 532 000 00 00".to_string(),
        },
        address: ShippingAddress {
            address_line: "Bagdat Cd. 1".to_string(),
            city: "Istanbul".to_string(),
            district: "Kadikoy".to_string(),
            postal_code: None,
        },
        items_total: breakdown.items_total,
        discount: breakdown.discount,
        coupon_code: None,
        subtotal: breakdown.subtotal,
        shipping_cost: breakdown.shipping_cost,
        cod_fee: breakdown.cod_fee,
        total: breakdown.total,
        payment_method: PaymentMethod::CashOnDelivery,
        shipping_method: ShippingMethod::Standard,
        tracking_number: None,
        notes: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order_details() -> OrderDetails {
    let order = make_order(OrderStatus::Pending);

    let item = |product_name: &str, variant_name: &str, quantity: u32, unit_price: u64| {
        OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: order.uuid,
            product_uuid: ProductUuid::new(),
            variant_uuid: VariantUuid::new(),
            product_name: product_name.to_string(),
            variant_name: variant_name.to_string(),
            quantity,
            unit_price,
            line_total: unit_price * u64::from(quantity),
        }
    };

    let items = vec![
        item("Whey Isolate", "Vanilla 2kg", 2, 500),
        item("BCAA", "Lemon", 1, 300),
    ];

    OrderDetails { order, items }
}
