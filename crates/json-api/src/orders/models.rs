//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::{
    data::{CustomerDetails, ShippingAddress},
    records::{OrderDetails, OrderItemRecord, OrderRecord},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CustomerResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<CustomerDetails> for CustomerResponse {
    fn from(customer: CustomerDetails) -> Self {
        CustomerResponse {
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressResponse {
    pub address_line: String,
    pub city: String,
    pub district: String,
    pub postal_code: Option<String>,
}

impl From<ShippingAddress> for AddressResponse {
    fn from(address: ShippingAddress) -> Self {
        AddressResponse {
            address_line: address.address_line,
            city: address.city,
            district: address.district,
            postal_code: address.postal_code,
        }
    }
}

/// Order line, as purchased
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,
    pub variant_uuid: Uuid,
    pub product_name: String,
    pub variant_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            product_uuid: item.product_uuid.into(),
            variant_uuid: item.variant_uuid.into(),
            product_name: item.product_name,
            variant_name: item.variant_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total,
        }
    }
}

/// Order without its items
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSummaryResponse {
    pub order_number: String,

    /// One of `pending`, `confirmed`, `preparing`, `shipped`, `delivered`, `cancelled`
    pub status: String,

    /// Absent for guest checkouts
    pub user_uuid: Option<Uuid>,
    pub customer: CustomerResponse,
    pub address: AddressResponse,
    pub items_total: u64,
    pub discount: u64,
    pub coupon_code: Option<String>,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub cod_fee: u64,
    pub total: u64,
    pub payment_method: String,
    pub shipping_method: String,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderSummaryResponse {
    fn from(order: OrderRecord) -> Self {
        OrderSummaryResponse {
            order_number: order.order_number,
            status: order.status.to_string(),
            user_uuid: order.user_uuid,
            customer: order.customer.into(),
            address: order.address.into(),
            items_total: order.items_total,
            discount: order.discount,
            coupon_code: order.coupon_code,
            subtotal: order.subtotal,
            shipping_cost: order.shipping_cost,
            cod_fee: order.cod_fee,
            total: order.total,
            payment_method: order.payment_method.as_str().to_string(),
            shipping_method: order.shipping_method.as_str().to_string(),
            tracking_number: order.tracking_number,
            notes: order.notes,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order with its items
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub order: OrderSummaryResponse,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderDetails> for OrderResponse {
    fn from(details: OrderDetails) -> Self {
        OrderResponse {
            order: details.order.into(),
            items: details.items.into_iter().map(Into::into).collect(),
        }
    }
}
