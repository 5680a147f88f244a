//! Store owner alerts.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use super::NOTIFICATION_TIMEOUT;
use crate::domain::orders::records::OrderDetails;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from owner webhook: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait OwnerNotifier: Send + Sync {
    /// Tell the store owner a new order arrived.
    async fn order_placed(&self, order: &OrderDetails) -> Result<(), NotifyError>;
}

/// Posts new-order alerts to a webhook.
#[derive(Debug, Clone)]
pub struct WebhookOwnerNotifier {
    url: String,
    http: Client,
}

impl WebhookOwnerNotifier {
    /// Create a notifier posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: String) -> Result<Self, NotifyError> {
        let http = Client::builder().timeout(NOTIFICATION_TIMEOUT).build()?;

        Ok(Self { url, http })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderPlacedPayload<'a> {
    order_number: &'a str,
    total: u64,
    customer_name: &'a str,
    item_count: u32,
    payment_method: &'a str,
}

impl<'a> OrderPlacedPayload<'a> {
    fn from_order(order: &'a OrderDetails) -> Self {
        Self {
            order_number: &order.order.order_number,
            total: order.order.total,
            customer_name: &order.order.customer.name,
            item_count: order.items.iter().map(|item| item.quantity).sum(),
            payment_method: order.order.payment_method.as_str(),
        }
    }
}

#[async_trait]
impl OwnerNotifier for WebhookOwnerNotifier {
    #[instrument(
        name = "notifications.owner.order_placed",
        skip(self, order),
        fields(order_number = %order.order.order_number),
        err
    )]
    async fn order_placed(&self, order: &OrderDetails) -> Result<(), NotifyError> {
        let response = self
            .http
            .post(&self.url)
            .json(&OrderPlacedPayload::from_order(order))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotifyError::UnexpectedResponse(format!(
                "webhook failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

/// Notifier used when no webhook is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOwnerNotifier;

#[async_trait]
impl OwnerNotifier for NoopOwnerNotifier {
    async fn order_placed(&self, _order: &OrderDetails) -> Result<(), NotifyError> {
        Ok(())
    }
}
