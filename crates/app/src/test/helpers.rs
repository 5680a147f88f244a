//! Test Helpers

use jiff::Timestamp;
use storefront::{
    cart::CheckoutLine,
    orders::OrderStatus,
    pricing::{PaymentMethod, ShippingMethod},
};

use crate::{
    domain::{
        catalog::{
            CatalogService, CatalogServiceError,
            data::{NewProduct, NewVariant},
            records::{ProductUuid, VariantRecord, VariantUuid},
        },
        orders::{
            data::{CheckoutRequest, CustomerDetails, ShippingAddress},
            records::{OrderDetails, OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn new_product(slug: &str, base_price: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: format!("Product {slug}"),
        slug: slug.to_string(),
        description: String::new(),
        brand_uuid: None,
        category_uuid: None,
        base_price,
    }
}

pub(crate) fn new_variant(sku: &str, price: u64, stock: u32) -> NewVariant {
    NewVariant {
        uuid: VariantUuid::new(),
        sku: sku.to_string(),
        name: format!("Variant {sku}"),
        size: None,
        flavor: None,
        price,
        stock,
    }
}

/// Create an active product with a single variant priced at `price`.
pub(crate) async fn create_stocked_variant(
    ctx: &TestContext,
    slug: &str,
    price: u64,
    stock: u32,
) -> Result<VariantRecord, CatalogServiceError> {
    let product = ctx.catalog.create_product(new_product(slug, price)).await?;

    ctx.catalog
        .create_variant(product.uuid, new_variant(&slug.to_uppercase(), price, stock))
        .await
}

pub(crate) fn line(variant: &VariantRecord, quantity: u32) -> CheckoutLine {
    CheckoutLine {
        variant_uuid: variant.uuid.into_uuid(),
        quantity,
    }
}

pub(crate) fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Ada Yilmaz".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+90 532 000 00 00".to_string(),
    }
}

pub(crate) fn address() -> ShippingAddress {
    ShippingAddress {
        address_line: "Bagdat Cd. 1".to_string(),
        city: "Istanbul".to_string(),
        district: "Kadikoy".to_string(),
        postal_code: Some("34710".to_string()),
    }
}

/// A guest checkout with both consents given and standard shipping.
pub(crate) fn checkout_request(
    items: Vec<CheckoutLine>,
    payment_method: PaymentMethod,
) -> CheckoutRequest {
    CheckoutRequest {
        user_uuid: None,
        customer: customer(),
        address: address(),
        items,
        shipping_method: ShippingMethod::Standard,
        payment_method,
        coupon_code: None,
        notes: None,
        accepted_terms: true,
        accepted_privacy: true,
        client_ip: None,
    }
}

fn order_item(
    order_uuid: OrderUuid,
    product_name: &str,
    variant_name: &str,
    quantity: u32,
    unit_price: u64,
) -> OrderItemRecord {
    OrderItemRecord {
        uuid: OrderItemUuid::new(),
        order_uuid,
        product_uuid: ProductUuid::new(),
        variant_uuid: VariantUuid::new(),
        product_name: product_name.to_string(),
        variant_name: variant_name.to_string(),
        quantity,
        unit_price,
        line_total: unit_price * u64::from(quantity),
    }
}

/// A placed cash-on-delivery order without touching the database.
///
/// Two whey at 700 and one BCAA at 200, standard shipping 30 and COD fee 10.
pub(crate) fn sample_order_details() -> OrderDetails {
    let uuid = OrderUuid::new();
    let now = Timestamp::now();

    OrderDetails {
        order: OrderRecord {
            uuid,
            order_number: "SN-20260301-ABCDEF".to_string(),
            user_uuid: None,
            status: OrderStatus::Pending,
            customer: customer(),
            address: address(),
            items_total: 1_600,
            discount: 0,
            coupon_code: None,
            subtotal: 1_600,
            shipping_cost: 30,
            cod_fee: 10,
            total: 1_640,
            payment_method: PaymentMethod::CashOnDelivery,
            shipping_method: ShippingMethod::Standard,
            tracking_number: None,
            notes: None,
            created_at: now,
            updated_at: now,
        },
        items: vec![
            order_item(uuid, "Whey Isolate", "Vanilla 2kg", 2, 700),
            order_item(uuid, "BCAA", "Lemon", 1, 200),
        ],
    }
}
