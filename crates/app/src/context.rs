//! App Context

use std::sync::Arc;

use storefront::pricing::PricingConfig;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        notifications::{
            HttpMailer, HttpMailerConfig, MailError, Mailer, NoopMailer, NoopOwnerNotifier,
            NotifyError, OwnerNotifier, WebhookOwnerNotifier,
        },
        orders::{OrdersService, PgOrdersService, side_effects::SideEffects},
        payments::{
            HttpPaymentGateway, HttpPaymentGatewayConfig, NoopPaymentGateway, PaymentError,
            PaymentGateway,
        },
        pricing::{PgPricingService, PricingService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("failed to build owner webhook client")]
    OwnerNotifier(#[source] NotifyError),

    #[error("failed to build mail client")]
    Mailer(#[source] MailError),

    #[error("failed to build payment gateway client")]
    PaymentGateway(#[source] PaymentError),
}

/// Outbound integrations. Anything left unset is replaced by a no-op.
#[derive(Debug, Clone, Default)]
pub struct IntegrationSettings {
    pub owner_webhook_url: Option<String>,
    pub mailer: Option<HttpMailerConfig>,
    pub payment_gateway: Option<HttpPaymentGatewayConfig>,
    pub payment_callback_url: String,
}

impl IntegrationSettings {
    /// Build the post-commit fan-out from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if an integration HTTP client cannot be built.
    pub fn side_effects(&self) -> Result<SideEffects, AppInitError> {
        let notifier: Arc<dyn OwnerNotifier> = match &self.owner_webhook_url {
            Some(url) => Arc::new(
                WebhookOwnerNotifier::new(url.clone()).map_err(AppInitError::OwnerNotifier)?,
            ),
            None => Arc::new(NoopOwnerNotifier),
        };

        let mailer: Arc<dyn Mailer> = match &self.mailer {
            Some(config) => {
                Arc::new(HttpMailer::new(config.clone()).map_err(AppInitError::Mailer)?)
            }
            None => Arc::new(NoopMailer),
        };

        let gateway: Arc<dyn PaymentGateway> = match &self.payment_gateway {
            Some(config) => Arc::new(
                HttpPaymentGateway::new(config.clone()).map_err(AppInitError::PaymentGateway)?,
            ),
            None => Arc::new(NoopPaymentGateway),
        };

        info!(
            owner_webhook = self.owner_webhook_url.is_some(),
            mailer = self.mailer.is_some(),
            payment_gateway = self.payment_gateway.is_some(),
            "configured order side effects"
        );

        Ok(SideEffects::new(
            notifier,
            mailer,
            gateway,
            self.payment_callback_url.clone(),
        ))
    }
}

/// Everything needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub pricing: PricingConfig,
    pub integrations: IntegrationSettings,
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub pricing: Arc<dyn PricingService>,
    pub orders: Arc<dyn OrdersService>,
    db: Db,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database and wire every service.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection, applying migrations or
    /// building an integration client fails.
    pub async fn from_settings(settings: &AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        let db = Db::new(pool);
        let side_effects = settings.integrations.side_effects()?;

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            pricing: Arc::new(PgPricingService::new(db.clone(), settings.pricing)),
            orders: Arc::new(PgOrdersService::new(
                db.clone(),
                settings.pricing,
                side_effects,
            )),
            db,
        })
    }

    /// Close the connection pool once in-flight requests have drained.
    pub async fn shutdown(&self) {
        self.db.close().await;
    }
}
