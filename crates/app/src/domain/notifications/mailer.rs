//! Transactional email.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use storefront::money::format_minor;
use thiserror::Error;
use tracing::instrument;

use super::NOTIFICATION_TIMEOUT;
use crate::domain::orders::records::OrderDetails;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from mail api: {0}")]
    UnexpectedResponse(String),
}

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Mail API settings.
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

/// Sends mail through an HTTP transactional email API.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    config: HttpMailerConfig,
    http: Client,
}

impl HttpMailer {
    /// Create a mailer for the given API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: HttpMailerConfig) -> Result<Self, MailError> {
        let http = Client::builder().timeout(NOTIFICATION_TIMEOUT).build()?;

        Ok(Self { config, http })
    }
}

#[derive(Debug, Serialize)]
struct SendMailBody<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl Mailer for HttpMailer {
    #[instrument(name = "notifications.mailer.send", skip(self, message), err)]
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&SendMailBody {
                from: &self.config.from,
                to: &message.to,
                subject: &message.subject,
                text: &message.text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailError::UnexpectedResponse(format!(
                "send failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}

/// Mailer used when no mail API is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<(), MailError> {
        Ok(())
    }
}

fn display_amount(amount: u64) -> String {
    format_minor(amount).unwrap_or_else(|_| amount.to_string())
}

/// Render the order confirmation sent to the buyer.
pub fn confirmation_email(order: &OrderDetails) -> EmailMessage {
    let record = &order.order;

    let mut lines = vec![
        format!("Hello {},", record.customer.name),
        String::new(),
        format!("Thank you for your order {}.", record.order_number),
        String::new(),
    ];

    lines.extend(order.items.iter().map(|item| {
        format!(
            "{} x {} ({}): {}",
            item.quantity,
            item.product_name,
            item.variant_name,
            display_amount(item.line_total)
        )
    }));

    lines.push(String::new());
    lines.push(format!("Items: {}", display_amount(record.items_total)));

    if record.discount > 0 {
        lines.push(format!(
            "Discount ({}): -{}",
            record.coupon_code.as_deref().unwrap_or_default(),
            display_amount(record.discount)
        ));
    }

    lines.push(format!("Shipping: {}", display_amount(record.shipping_cost)));

    if record.cod_fee > 0 {
        lines.push(format!(
            "Cash on delivery fee: {}",
            display_amount(record.cod_fee)
        ));
    }

    lines.push(format!("Total: {}", display_amount(record.total)));
    lines.push(String::new());
    lines.push(format!(
        "Track your order any time with the number {}.",
        record.order_number
    ));

    EmailMessage {
        to: record.customer.email.clone(),
        subject: format!("Order {} received", record.order_number),
        text: lines.join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use crate::test::helpers::sample_order_details;

    use super::*;

    #[test]
    fn confirmation_lists_items_and_fees() {
        let order = sample_order_details();

        let message = confirmation_email(&order);

        assert_eq!(message.to, "ada@example.com");
        assert_eq!(message.subject, "Order SN-20260301-ABCDEF received");
        assert!(message.text.contains("2 x Whey Isolate (Vanilla 2kg)"));
        assert!(message.text.contains("Cash on delivery fee"));
        assert!(!message.text.contains("Discount"));
    }
}
