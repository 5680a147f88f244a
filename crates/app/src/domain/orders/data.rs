//! Order Data

use serde::{Deserialize, Serialize};
use storefront::{
    cart::CheckoutLine,
    orders::OrderStatus,
    pricing::{PaymentMethod, PriceBreakdown, ShippingMethod},
};
use uuid::Uuid;

use crate::domain::orders::records::OrderUuid;

/// Buyer contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub address_line: String,
    pub city: String,
    pub district: String,
    pub postal_code: Option<String>,
}

/// Everything a buyer submits at checkout. Prices are never taken from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Signed-in buyer, `None` for guest checkout.
    pub user_uuid: Option<Uuid>,
    pub customer: CustomerDetails,
    pub address: ShippingAddress,
    pub items: Vec<CheckoutLine>,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
    pub notes: Option<String>,
    pub accepted_terms: bool,
    pub accepted_privacy: bool,
    /// Buyer address forwarded to the payment gateway.
    pub client_ip: Option<String>,
}

/// Admin order listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl OrderFilter {
    pub const MAX_LIMIT: u32 = 100;
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            status: None,
            limit: 50,
            offset: 0,
        }
    }
}

/// Row values for a new order, computed inside the checkout transaction.
#[derive(Debug, Clone)]
pub(crate) struct NewOrder<'a> {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub request: &'a CheckoutRequest,
    pub breakdown: &'a PriceBreakdown,
}
