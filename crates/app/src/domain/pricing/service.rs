//! Pricing service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashSet;
use storefront::{
    bundles::{BundleQuote, BundleRule, price_bundle},
    pricing::{PricingConfig, PricingOptions, price_lines},
};
use tracing::{Span, instrument};

use crate::{
    database::Db,
    domain::{
        catalog::{records::ProductUuid, repository::PgCatalogRepository},
        pricing::{
            data::{PriceQuote, QuoteRequest},
            errors::PricingServiceError,
            lines::{assemble_lines, merge_lines, variant_uuids},
            repository::PgPricingRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPricingService {
    db: Db,
    config: PricingConfig,
    bundle_rule: BundleRule,
    repository: PgPricingRepository,
    catalog: PgCatalogRepository,
}

impl PgPricingService {
    #[must_use]
    pub fn new(db: Db, config: PricingConfig) -> Self {
        Self {
            db,
            config,
            bundle_rule: BundleRule::default(),
            repository: PgPricingRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }

    #[must_use]
    pub fn with_bundle_rule(mut self, bundle_rule: BundleRule) -> Self {
        self.bundle_rule = bundle_rule;
        self
    }
}

#[async_trait]
impl PricingService for PgPricingService {
    #[instrument(
        name = "pricing.service.quote",
        skip(self, request),
        fields(line_count = request.items.len(), total = tracing::field::Empty),
        err
    )]
    async fn quote(&self, request: QuoteRequest) -> Result<PriceQuote, PricingServiceError> {
        let requested = merge_lines(&request.items)?;
        let at = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let records = self
            .repository
            .variant_lines(&mut tx, &variant_uuids(&requested))
            .await?;

        let inputs = self.repository.pricing_inputs(&mut tx, at).await?;

        tx.commit().await?;

        let lines =
            assemble_lines(&requested, &records).map_err(PricingServiceError::VariantNotFound)?;

        let breakdown = price_lines(
            &lines,
            &PricingOptions {
                shipping_method: request.shipping_method,
                payment_method: request.payment_method,
                coupon_code: request.coupon_code.as_deref(),
                at,
            },
            &inputs.context(&self.config),
        )?;

        Span::current().record("total", breakdown.total);

        Ok(PriceQuote { lines, breakdown })
    }

    #[instrument(
        name = "pricing.service.quote_bundle",
        skip(self, products),
        fields(product_count = products.len()),
        err
    )]
    async fn quote_bundle(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<BundleQuote, PricingServiceError> {
        let mut seen = FxHashSet::default();
        let selected: Vec<ProductUuid> = products
            .into_iter()
            .filter(|product| seen.insert(*product))
            .collect();

        let mut tx = self.db.begin().await?;

        let prices = self.catalog.first_variant_prices(&mut tx, &selected).await?;

        tx.commit().await?;

        if let Some(missing) = selected.iter().find(|product| {
            !prices
                .iter()
                .any(|line| line.product_uuid == product.into_uuid())
        }) {
            return Err(PricingServiceError::ProductUnavailable(*missing));
        }

        Ok(price_bundle(&prices, &self.bundle_rule)?)
    }
}

#[automock]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// Price a cart against current catalog state without reserving anything.
    async fn quote(&self, request: QuoteRequest) -> Result<PriceQuote, PricingServiceError>;

    /// Price a build-your-own bundle from each product's first variant.
    async fn quote_bundle(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<BundleQuote, PricingServiceError>;
}
