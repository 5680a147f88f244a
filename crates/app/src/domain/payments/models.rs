//! Payment Models

use serde::{Deserialize, Serialize};

/// What to do about payment once an order is placed. Each method carries only what it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentRequest {
    /// Collected by the courier.
    CashOnDelivery,

    /// Hosted checkout form through the external gateway.
    CreditCard(CreditCardPayment),

    /// Paid manually against the order number.
    BankTransfer,
}

/// Checkout form initialisation payload sent to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPayment {
    /// Correlates gateway callbacks with the order; the order number.
    pub conversation_id: String,
    /// Sum of basket item prices, minor units.
    pub price: u64,
    /// Amount charged, minor units.
    pub paid_price: u64,
    pub currency: String,
    pub basket_id: String,
    pub callback_url: String,
    pub buyer: PaymentBuyer,
    pub basket_items: Vec<PaymentBasketItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBuyer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub ip: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBasketItem {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Line total, minor units.
    pub price: u64,
}

/// An initialised hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    pub token: String,
    /// Opaque form markup the buyer's browser renders to pay.
    pub checkout_form_html: String,
}
