//! Integrations Config

use std::time::Duration;

use clap::Args;
use storefront_app::{
    context::IntegrationSettings,
    domain::{notifications::HttpMailerConfig, payments::HttpPaymentGatewayConfig},
};

/// Outbound integrations. Each one is disabled until its URL is set.
#[derive(Debug, Args)]
pub struct IntegrationsConfig {
    /// Webhook notified of every new order
    #[arg(long, env = "OWNER_WEBHOOK_URL")]
    pub owner_webhook_url: Option<String>,

    /// Transactional email API endpoint
    #[arg(long, env = "MAIL_API_URL")]
    pub mail_api_url: Option<String>,

    /// Transactional email API key
    #[arg(long, env = "MAIL_API_KEY", hide_env_values = true, default_value = "")]
    pub mail_api_key: String,

    /// Sender address for confirmation emails
    #[arg(long, env = "MAIL_FROM", default_value = "orders@localhost")]
    pub mail_from: String,

    /// Hosted checkout gateway base URL
    #[arg(long, env = "PAYMENT_GATEWAY_URL")]
    pub payment_gateway_url: Option<String>,

    /// Hosted checkout gateway API key
    #[arg(long, env = "PAYMENT_API_KEY", hide_env_values = true, default_value = "")]
    pub payment_api_key: String,

    /// URL the gateway redirects the buyer to after payment
    #[arg(long, env = "PAYMENT_CALLBACK_URL", default_value = "")]
    pub payment_callback_url: String,

    /// Whole-request timeout for gateway calls
    #[arg(long, env = "PAYMENT_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub payment_timeout_seconds: u64,
}

impl IntegrationsConfig {
    #[must_use]
    pub fn to_settings(&self) -> IntegrationSettings {
        IntegrationSettings {
            owner_webhook_url: non_blank(self.owner_webhook_url.as_deref()),
            mailer: non_blank(self.mail_api_url.as_deref()).map(|api_url| HttpMailerConfig {
                api_url,
                api_key: self.mail_api_key.clone(),
                from: self.mail_from.clone(),
            }),
            payment_gateway: non_blank(self.payment_gateway_url.as_deref()).map(|base_url| {
                HttpPaymentGatewayConfig {
                    base_url,
                    api_key: self.payment_api_key.clone(),
                    timeout: Duration::from_secs(self.payment_timeout_seconds),
                }
            }),
            payment_callback_url: self.payment_callback_url.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
