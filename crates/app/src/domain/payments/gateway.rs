//! Payment gateway client.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::domain::payments::models::{CreditCardPayment, PaymentSession};

/// Errors raised while initialising a payment.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The gateway did not answer in time.
    #[error("payment gateway timed out")]
    Timeout,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    /// The gateway answered but declined to open a session.
    #[error("payment gateway rejected the request: {0}")]
    Rejected(String),

    /// The gateway returned a non-2xx response or unexpected body.
    #[error("unexpected response from payment gateway: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error)
        }
    }
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open a hosted checkout session for a card payment.
    async fn initialize(&self, payment: &CreditCardPayment)
    -> Result<PaymentSession, PaymentError>;
}

/// Connection settings for the hosted checkout gateway.
#[derive(Debug, Clone)]
pub struct HttpPaymentGatewayConfig {
    /// Base URL, e.g. `"https://sandbox-api.example.com"`.
    pub base_url: String,

    /// API key sent as a bearer token.
    pub api_key: String,

    /// Whole-request timeout.
    pub timeout: Duration,
}

/// HTTP client for the hosted checkout gateway.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    config: HttpPaymentGatewayConfig,
    http: Client,
}

impl HttpPaymentGateway {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: HttpPaymentGatewayConfig) -> Result<Self, PaymentError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    #[instrument(
        name = "payments.gateway.initialize",
        skip(self, payment),
        fields(conversation_id = %payment.conversation_id),
        err
    )]
    async fn initialize(
        &self,
        payment: &CreditCardPayment,
    ) -> Result<PaymentSession, PaymentError> {
        let url = format!(
            "{}/payment/checkout-form/initialize",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(payment)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaymentError::UnexpectedResponse(format!(
                "initialize request failed with status {status}: {text}"
            )));
        }

        let parsed: InitializeResponse = response.json().await?;

        parsed.into_session()
    }
}

/// Gateway used when no payment provider is configured. Every attempt fails, leaving the order
/// pending manual payment.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPaymentGateway;

#[async_trait]
impl PaymentGateway for NoopPaymentGateway {
    async fn initialize(
        &self,
        _payment: &CreditCardPayment,
    ) -> Result<PaymentSession, PaymentError> {
        Err(PaymentError::Rejected(
            "no payment gateway configured".to_string(),
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeResponse {
    status: String,
    token: Option<String>,
    checkout_form_content: Option<String>,
    error_message: Option<String>,
}

impl InitializeResponse {
    fn into_session(self) -> Result<PaymentSession, PaymentError> {
        if self.status != "success" {
            return Err(PaymentError::Rejected(
                self.error_message
                    .unwrap_or_else(|| format!("status {}", self.status)),
            ));
        }

        match (self.token, self.checkout_form_content) {
            (Some(token), Some(checkout_form_html)) => Ok(PaymentSession {
                token,
                checkout_form_html,
            }),
            _ => Err(PaymentError::UnexpectedResponse(
                "successful response without token or form".to_string(),
            )),
        }
    }
}
