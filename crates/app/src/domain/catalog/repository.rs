//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::bundles::BundleLine;
use uuid::Uuid;

use crate::{
    database::{to_db_amount, to_db_count, try_get_amount, try_get_count},
    domain::catalog::{
        data::{NewProduct, NewVariant},
        records::{ProductRecord, ProductUuid, VariantRecord, VariantUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const LIST_PRODUCT_VARIANTS_SQL: &str = include_str!("sql/list_product_variants.sql");
const GET_VARIANT_SQL: &str = include_str!("sql/get_variant.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const SET_PRODUCT_ACTIVE_SQL: &str = include_str!("sql/set_product_active.sql");
const SET_VARIANT_ACTIVE_SQL: &str = include_str!("sql/set_variant_active.sql");
const RESTOCK_VARIANT_SQL: &str = include_str!("sql/restock_variant.sql");
const FIRST_VARIANT_PRICES_SQL: &str = include_str!("sql/first_variant_prices.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        active_only: bool,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(active_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
        active_only: bool,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .bind(active_only)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_product_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        active_only: bool,
    ) -> Result<Vec<VariantRecord>, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(LIST_PRODUCT_VARIANTS_SQL)
            .bind(product.into_uuid())
            .bind(active_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(GET_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.slug)
            .bind(product.description)
            .bind(product.brand_uuid)
            .bind(product.category_uuid)
            .bind(to_db_amount("base_price", product.base_price)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        variant: NewVariant,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(product.into_uuid())
            .bind(variant.sku)
            .bind(variant.name)
            .bind(variant.size)
            .bind(variant.flavor)
            .bind(to_db_amount("price", variant.price)?)
            .bind(to_db_count("stock", variant.stock)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_product_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        is_active: bool,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(SET_PRODUCT_ACTIVE_SQL)
            .bind(product.into_uuid())
            .bind(is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_variant_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        is_active: bool,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(SET_VARIANT_ACTIVE_SQL)
            .bind(variant.into_uuid())
            .bind(is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn restock_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(RESTOCK_VARIANT_SQL)
            .bind(variant.into_uuid())
            .bind(to_db_count("quantity", quantity)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn first_variant_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<BundleLine>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().copied().map(ProductUuid::into_uuid).collect();

        let rows = query(FIRST_VARIANT_PRICES_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(BundleLine {
                    product_uuid: row.try_get("product_uuid")?,
                    first_variant_price: try_get_amount(row, "price")?,
                })
            })
            .collect()
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            brand_uuid: row.try_get("brand_uuid")?,
            category_uuid: row.try_get("category_uuid")?,
            base_price: try_get_amount(row, "base_price")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            size: row.try_get("size")?,
            flavor: row.try_get("flavor")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_count(row, "stock")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
