//! Stock Repository

use sqlx::{Postgres, Transaction, query, query_as};
use uuid::Uuid;

use crate::{
    database::to_db_count,
    domain::{catalog::records::VariantUuid, pricing::records::VariantLineRecord},
};

const LOCK_VARIANT_LINES_SQL: &str = include_str!("../sql/lock_variant_lines.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("../sql/decrement_stock.sql");
const RESTOCK_VARIANT_SQL: &str = include_str!("../sql/restock_variant.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgStockRepository;

impl PgStockRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read and row-lock variants, in UUID order so concurrent checkouts cannot deadlock.
    pub(crate) async fn lock_variant_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variants: &[Uuid],
    ) -> Result<Vec<VariantLineRecord>, sqlx::Error> {
        query_as::<Postgres, VariantLineRecord>(LOCK_VARIANT_LINES_SQL)
            .bind(variants)
            .fetch_all(&mut **tx)
            .await
    }

    /// Take `quantity` units if that many remain. Returns the number of rows changed, zero
    /// meaning the stock was short.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(variant.into_uuid())
            .bind(to_db_count("quantity", quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn restock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTOCK_VARIANT_SQL)
            .bind(variant.into_uuid())
            .bind(to_db_count("quantity", quantity)?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
