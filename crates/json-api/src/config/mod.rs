//! Server configuration module

use clap::Parser;

use crate::config::{
    admin::AdminConfig,
    db::DatabaseConfig,
    integrations::IntegrationsConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    pricing::PricingSettings,
    server::ServerRuntimeConfig,
};

pub(crate) mod admin;
pub(crate) mod db;
pub(crate) mod integrations;
pub(crate) mod observability;
pub(crate) mod pricing;
pub(crate) mod server;

pub(crate) use observability::LogFormat;

/// Storefront JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Shipping and fee amounts.
    #[command(flatten)]
    pub pricing: PricingSettings,

    /// Owner webhook, mail and payment gateway settings.
    #[command(flatten)]
    pub integrations: IntegrationsConfig,

    /// Admin endpoint settings.
    #[command(flatten)]
    pub admin: AdminConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use storefront::pricing::PricingConfig;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_need_only_a_database_url() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.pricing.to_pricing_config(), PricingConfig::default());
        assert!(config.integrations.owner_webhook_url.is_none());
        assert!(config.admin.admin_token_sha256.is_none());

        Ok(())
    }
}
