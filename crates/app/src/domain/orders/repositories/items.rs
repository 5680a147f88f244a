//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use storefront::pricing::PricedLine;

use crate::{
    database::{to_db_amount, to_db_count, try_get_amount, try_get_count},
    domain::{
        catalog::records::{ProductUuid, VariantUuid},
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Copy each priced line into the order with its current names and price.
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[PricedLine],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let mut items = Vec::with_capacity(lines.len());

        for line in lines {
            let line_total = line
                .line_total()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "line_total".to_string(),
                    source: Box::new(e),
                })?;

            let item = query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
                .bind(OrderItemUuid::new().into_uuid())
                .bind(order.into_uuid())
                .bind(line.product_uuid)
                .bind(line.variant_uuid)
                .bind(&line.product_name)
                .bind(&line.variant_name)
                .bind(to_db_count("quantity", line.quantity)?)
                .bind(to_db_amount("unit_price", line.unit_price)?)
                .bind(to_db_amount("line_total", line_total)?)
                .fetch_one(&mut **tx)
                .await?;

            items.push(item);
        }

        Ok(items)
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant_uuid: VariantUuid::from_uuid(row.try_get("variant_uuid")?),
            product_name: row.try_get("product_name")?,
            variant_name: row.try_get("variant_name")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            line_total: try_get_amount(row, "line_total")?,
        })
    }
}
