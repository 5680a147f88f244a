//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use storefront::bundles::BundleLine;
use tracing::{debug, instrument};

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewProduct, NewVariant},
        errors::CatalogServiceError,
        records::{ProductDetails, ProductRecord, ProductUuid, VariantRecord, VariantUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    #[instrument(name = "catalog.service.list_products", skip(self), err)]
    async fn list_products(
        &self,
        active_only: bool,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, active_only).await?;

        tx.commit().await?;

        Ok(products)
    }

    #[instrument(name = "catalog.service.get_product_by_slug", skip(self), err)]
    async fn get_product_by_slug(
        &self,
        slug: &str,
        active_only: bool,
    ) -> Result<ProductDetails, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .repository
            .get_product_by_slug(&mut tx, slug, active_only)
            .await?;

        let variants = self
            .repository
            .list_product_variants(&mut tx, product.uuid, active_only)
            .await?;

        tx.commit().await?;

        Ok(ProductDetails { product, variants })
    }

    #[instrument(name = "catalog.service.get_variant", skip(self), err)]
    async fn get_variant(&self, variant: VariantUuid) -> Result<VariantRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let variant = self.repository.get_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(variant)
    }

    #[instrument(
        name = "catalog.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, slug = %product.slug),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        if product.name.trim().is_empty() || product.slug.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(
        name = "catalog.service.create_variant",
        skip(self, variant),
        fields(variant_uuid = %variant.uuid, sku = %variant.sku),
        err
    )]
    async fn create_variant(
        &self,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, CatalogServiceError> {
        if variant.sku.trim().is_empty() || variant.name.trim().is_empty() {
            return Err(CatalogServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_variant(&mut tx, product, variant)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(name = "catalog.service.set_product_active", skip(self), err)]
    async fn set_product_active(
        &self,
        product: ProductUuid,
        is_active: bool,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_product_active(&mut tx, product, is_active)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[instrument(name = "catalog.service.set_variant_active", skip(self), err)]
    async fn set_variant_active(
        &self,
        variant: VariantUuid,
        is_active: bool,
    ) -> Result<VariantRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .set_variant_active(&mut tx, variant, is_active)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[instrument(name = "catalog.service.restock_variant", skip(self), err)]
    async fn restock_variant(
        &self,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<VariantRecord, CatalogServiceError> {
        if quantity == 0 {
            return Err(CatalogServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .restock_variant(&mut tx, variant, quantity)
            .await?;

        tx.commit().await?;

        debug!(stock = updated.stock, "variant restocked");

        Ok(updated)
    }

    #[instrument(
        name = "catalog.service.first_variant_prices",
        skip(self, products),
        fields(product_count = products.len()),
        err
    )]
    async fn first_variant_prices(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<BundleLine>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self
            .repository
            .first_variant_prices(&mut tx, products)
            .await?;

        tx.commit().await?;

        Ok(lines)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List products, optionally only the active ones.
    async fn list_products(
        &self,
        active_only: bool,
    ) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a product and its variants by slug.
    async fn get_product_by_slug(
        &self,
        slug: &str,
        active_only: bool,
    ) -> Result<ProductDetails, CatalogServiceError>;

    /// Retrieve a single variant.
    async fn get_variant(&self, variant: VariantUuid) -> Result<VariantRecord, CatalogServiceError>;

    /// Create a product.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, CatalogServiceError>;

    /// Create a variant under an existing product.
    async fn create_variant(
        &self,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, CatalogServiceError>;

    /// Activate or soft-delete a product.
    async fn set_product_active(
        &self,
        product: ProductUuid,
        is_active: bool,
    ) -> Result<ProductRecord, CatalogServiceError>;

    /// Activate or soft-delete a variant.
    async fn set_variant_active(
        &self,
        variant: VariantUuid,
        is_active: bool,
    ) -> Result<VariantRecord, CatalogServiceError>;

    /// Add units to a variant's stock.
    async fn restock_variant(
        &self,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<VariantRecord, CatalogServiceError>;

    /// Price of each active product's first active variant, for bundle quotes. Products without
    /// one are omitted.
    async fn first_variant_prices(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<BundleLine>, CatalogServiceError>;
}
