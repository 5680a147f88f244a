//! Post-commit side effects.
//!
//! Owner alert, confirmation email and card payment initialisation run concurrently once the
//! order is durable. None of them can undo the order: notification failures and timeouts are
//! logged and dropped, and a failed payment initialisation leaves the order awaiting payment.

use std::{fmt, sync::Arc, time::Duration};

use storefront::{money::CURRENCY_CODE, pricing::PaymentMethod};
use tokio::time;
use tracing::{info, warn};

use crate::domain::{
    notifications::{
        Mailer, NOTIFICATION_TIMEOUT, NoopMailer, NoopOwnerNotifier, OwnerNotifier,
        confirmation_email,
    },
    orders::records::OrderDetails,
    payments::{
        NoopPaymentGateway, PaymentGateway,
        models::{
            CreditCardPayment, PaymentBasketItem, PaymentBuyer, PaymentRequest, PaymentSession,
        },
    },
};

/// Address reported to the gateway when the buyer's is unknown.
const UNKNOWN_CLIENT_IP: &str = "0.0.0.0";

/// Payment state after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Cash on delivery or bank transfer; nothing to initialise.
    NotRequired,

    /// Hosted card checkout opened.
    Initialized(PaymentSession),

    /// Card checkout could not be opened; payment is pending.
    Failed,
}

#[derive(Clone)]
pub struct SideEffects {
    notifier: Arc<dyn OwnerNotifier>,
    mailer: Arc<dyn Mailer>,
    gateway: Arc<dyn PaymentGateway>,
    payment_callback_url: String,
    notification_timeout: Duration,
}

impl fmt::Debug for SideEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SideEffects")
            .field("payment_callback_url", &self.payment_callback_url)
            .field("notification_timeout", &self.notification_timeout)
            .finish_non_exhaustive()
    }
}

impl SideEffects {
    #[must_use]
    pub fn new(
        notifier: Arc<dyn OwnerNotifier>,
        mailer: Arc<dyn Mailer>,
        gateway: Arc<dyn PaymentGateway>,
        payment_callback_url: String,
    ) -> Self {
        Self {
            notifier,
            mailer,
            gateway,
            payment_callback_url,
            notification_timeout: NOTIFICATION_TIMEOUT,
        }
    }

    /// Cap on how long checkout waits for each notification.
    #[must_use]
    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.notification_timeout = timeout;
        self
    }

    /// No notifications and no payment gateway.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(
            Arc::new(NoopOwnerNotifier),
            Arc::new(NoopMailer),
            Arc::new(NoopPaymentGateway),
            String::new(),
        )
    }

    /// Build the payment request for an order's payment method.
    #[must_use]
    pub fn payment_request(&self, order: &OrderDetails, client_ip: Option<&str>) -> PaymentRequest {
        let record = &order.order;

        match record.payment_method {
            PaymentMethod::CashOnDelivery => PaymentRequest::CashOnDelivery,
            PaymentMethod::BankTransfer => PaymentRequest::BankTransfer,
            PaymentMethod::CreditCard => PaymentRequest::CreditCard(CreditCardPayment {
                conversation_id: record.order_number.clone(),
                price: record.items_total,
                paid_price: record.total,
                currency: CURRENCY_CODE.to_string(),
                basket_id: record.order_number.clone(),
                callback_url: self.payment_callback_url.clone(),
                buyer: PaymentBuyer {
                    name: record.customer.name.clone(),
                    email: record.customer.email.clone(),
                    phone: record.customer.phone.clone(),
                    ip: client_ip.unwrap_or(UNKNOWN_CLIENT_IP).to_string(),
                    address: record.address.address_line.clone(),
                    city: record.address.city.clone(),
                },
                basket_items: order
                    .items
                    .iter()
                    .map(|item| PaymentBasketItem {
                        id: item.variant_uuid.to_string(),
                        name: format!("{} {}", item.product_name, item.variant_name),
                        quantity: item.quantity,
                        price: item.line_total,
                    })
                    .collect(),
            }),
        }
    }

    async fn initialize_payment(&self, request: &PaymentRequest) -> PaymentOutcome {
        let PaymentRequest::CreditCard(payment) = request else {
            return PaymentOutcome::NotRequired;
        };

        match self.gateway.initialize(payment).await {
            Ok(session) => PaymentOutcome::Initialized(session),
            Err(error) => {
                warn!(
                    order_number = %payment.conversation_id,
                    error = %error,
                    "payment initialisation failed, order left pending payment"
                );

                PaymentOutcome::Failed
            }
        }
    }

    /// Run every side effect for a committed order.
    pub async fn dispatch(&self, order: &OrderDetails, client_ip: Option<&str>) -> PaymentOutcome {
        let order_number = &order.order.order_number;
        let request = self.payment_request(order, client_ip);
        let email = confirmation_email(order);

        let (notified, mailed, payment) = tokio::join!(
            time::timeout(self.notification_timeout, self.notifier.order_placed(order)),
            time::timeout(self.notification_timeout, self.mailer.send(&email)),
            self.initialize_payment(&request),
        );

        match notified {
            Ok(Ok(())) => {}
            Ok(Err(error)) => warn!(%order_number, error = %error, "owner notification failed"),
            Err(elapsed) => warn!(%order_number, %elapsed, "owner notification timed out"),
        }

        match mailed {
            Ok(Ok(())) => {}
            Ok(Err(error)) => warn!(%order_number, error = %error, "confirmation email failed"),
            Err(elapsed) => warn!(%order_number, %elapsed, "confirmation email timed out"),
        }

        info!(
            %order_number,
            payment_pending = matches!(payment, PaymentOutcome::Failed),
            "side effects dispatched"
        );

        payment
    }
}
