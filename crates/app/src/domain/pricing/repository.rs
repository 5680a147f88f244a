//! Pricing Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use storefront::{
    campaigns::{GiftCampaign, GiftTier},
    coupons::Coupon,
};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_count},
    domain::{
        catalog::records::{ProductUuid, VariantUuid},
        pricing::records::{PricingInputs, VariantLineRecord},
    },
};

const VARIANT_LINES_SQL: &str = include_str!("sql/variant_lines.sql");
const ACTIVE_COUPONS_SQL: &str = include_str!("sql/active_coupons.sql");
const ACTIVE_CAMPAIGN_SQL: &str = include_str!("sql/active_campaign.sql");
const CAMPAIGN_TIERS_SQL: &str = include_str!("sql/campaign_tiers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPricingRepository;

impl PgPricingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read variants with their product names, without locking.
    pub(crate) async fn variant_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variants: &[Uuid],
    ) -> Result<Vec<VariantLineRecord>, sqlx::Error> {
        query_as::<Postgres, VariantLineRecord>(VARIANT_LINES_SQL)
            .bind(variants)
            .fetch_all(&mut **tx)
            .await
    }

    /// Coupons and campaign in force at `at`.
    pub(crate) async fn pricing_inputs(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        at: Timestamp,
    ) -> Result<PricingInputs, sqlx::Error> {
        let coupons = self.active_coupons(tx, at).await?;
        let campaign = self.active_campaign(tx, at).await?;

        Ok(PricingInputs { coupons, campaign })
    }

    pub(crate) async fn active_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        at: Timestamp,
    ) -> Result<Vec<Coupon>, sqlx::Error> {
        let rows = query(ACTIVE_COUPONS_SQL)
            .bind(SqlxTimestamp::from(at))
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                let code: String = row.try_get("code")?;

                Ok(Coupon::new(&code, try_get_count(row, "percent_bps")?)
                    .with_expiry(
                        row.try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                            .map(SqlxTimestamp::to_jiff),
                    )
                    .with_active(row.try_get("is_active")?))
            })
            .collect()
    }

    /// The most recently started campaign running at `at`, with its tiers.
    pub(crate) async fn active_campaign(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        at: Timestamp,
    ) -> Result<Option<GiftCampaign>, sqlx::Error> {
        let Some((uuid, name)) = query_as::<Postgres, (Uuid, String)>(ACTIVE_CAMPAIGN_SQL)
            .bind(SqlxTimestamp::from(at))
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let rows = query(CAMPAIGN_TIERS_SQL)
            .bind(uuid)
            .fetch_all(&mut **tx)
            .await?;

        let tiers = rows
            .iter()
            .map(|row| {
                Ok(GiftTier {
                    threshold: try_get_amount(row, "threshold")?,
                    reward: row.try_get("reward")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(Some(GiftCampaign::new(uuid, name, tiers)))
    }
}

impl<'r> FromRow<'r, PgRow> for VariantLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            variant_uuid: VariantUuid::from_uuid(row.try_get("variant_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            variant_name: row.try_get("variant_name")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_count(row, "stock")?,
            is_available: row.try_get("is_available")?,
        })
    }
}
