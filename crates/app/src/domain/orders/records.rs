//! Order Records

use jiff::Timestamp;
use storefront::{
    orders::OrderStatus,
    pricing::{PaymentMethod, PriceBreakdown, ShippingMethod},
};
use uuid::Uuid;

use crate::{
    domain::{
        catalog::records::{ProductUuid, VariantUuid},
        orders::{
            data::{CustomerDetails, ShippingAddress},
            side_effects::PaymentOutcome,
        },
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Record
///
/// Money columns satisfy `subtotal == items_total - discount` and
/// `total == subtotal + shipping_cost + cod_fee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: Option<Uuid>,
    pub status: OrderStatus,
    pub customer: CustomerDetails,
    pub address: ShippingAddress,
    pub items_total: u64,
    pub discount: u64,
    pub coupon_code: Option<String>,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub cod_fee: u64,
    pub total: u64,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
///
/// Names and price are copied at purchase time and never follow later catalog edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: VariantUuid,
    pub product_name: String,
    pub variant_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub line_total: u64,
}

/// An order with its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub details: OrderDetails,
    pub breakdown: PriceBreakdown,
    pub payment: PaymentOutcome,
}

impl PlacedOrder {
    /// Card payment could not be initialised; the order stands and awaits manual payment.
    #[must_use]
    pub fn payment_pending(&self) -> bool {
        matches!(self.payment, PaymentOutcome::Failed)
    }

    /// Hosted checkout markup for the card path.
    #[must_use]
    pub fn payment_html(&self) -> Option<&str> {
        match &self.payment {
            PaymentOutcome::Initialized(session) => Some(&session.checkout_form_html),
            PaymentOutcome::NotRequired | PaymentOutcome::Failed => None,
        }
    }
}
