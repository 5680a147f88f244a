//! State

use std::sync::Arc;

use storefront_app::{
    context::AppContext,
    domain::{catalog::CatalogService, orders::OrdersService, pricing::PricingService},
};

/// Services shared by every handler. Built once in `main` and injected into the router.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) catalog: Arc<dyn CatalogService>,
    pub(crate) pricing: Arc<dyn PricingService>,
    pub(crate) orders: Arc<dyn OrdersService>,

    /// Hex SHA-256 of the admin bearer token.
    pub(crate) admin_token_sha256: Option<String>,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(
        app: &AppContext,
        admin_token_sha256: Option<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            catalog: Arc::clone(&app.catalog),
            pricing: Arc::clone(&app.pricing),
            orders: Arc::clone(&app.orders),
            admin_token_sha256,
        })
    }
}
