//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use storefront::orders::OrderStatus;

use crate::{
    database::{to_db_amount, try_get_amount},
    domain::orders::{
        data::{CustomerDetails, NewOrder, OrderFilter, ShippingAddress},
        records::{OrderRecord, OrderUuid},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_BY_NUMBER_SQL: &str = include_str!("../sql/get_order_by_number.sql");
const LOCK_ORDER_BY_NUMBER_SQL: &str = include_str!("../sql/lock_order_by_number.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const SET_TRACKING_NUMBER_SQL: &str = include_str!("../sql/set_tracking_number.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder<'_>,
    ) -> Result<OrderRecord, sqlx::Error> {
        let request = order.request;
        let breakdown = order.breakdown;

        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.order_number)
            .bind(request.user_uuid)
            .bind(request.customer.name.trim())
            .bind(request.customer.email.trim())
            .bind(request.customer.phone.trim())
            .bind(request.address.address_line.trim())
            .bind(request.address.city.trim())
            .bind(request.address.district.trim())
            .bind(request.address.postal_code.as_deref().map(str::trim))
            .bind(to_db_amount("items_total", breakdown.items_total)?)
            .bind(to_db_amount("discount", breakdown.discount)?)
            .bind(breakdown.coupon.applied_code())
            .bind(to_db_amount("subtotal", breakdown.subtotal)?)
            .bind(to_db_amount("shipping_cost", breakdown.shipping_cost)?)
            .bind(to_db_amount("cod_fee", breakdown.cod_fee)?)
            .bind(to_db_amount("total", breakdown.total)?)
            .bind(request.payment_method.as_str())
            .bind(request.shipping_method.as_str())
            .bind(request.notes.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_by_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_BY_NUMBER_SQL)
            .bind(order_number)
            .fetch_one(&mut **tx)
            .await
    }

    /// Read an order and hold its row lock until the transaction ends.
    pub(crate) async fn lock_order_by_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order_number: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_BY_NUMBER_SQL)
            .bind(order_number)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(filter.status.map(OrderStatus::as_str))
            .bind(i64::from(filter.limit))
            .bind(i64::from(filter.offset))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_tracking_number(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        tracking_number: &str,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(SET_TRACKING_NUMBER_SQL)
            .bind(order.into_uuid())
            .bind(tracking_number)
            .fetch_one(&mut **tx)
            .await
    }
}

/// Parse a text column through `FromStr`.
fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(col)?;

    value.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            user_uuid: row.try_get("user_uuid")?,
            status: try_get_parsed(row, "status")?,
            customer: CustomerDetails {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
                phone: row.try_get("customer_phone")?,
            },
            address: ShippingAddress {
                address_line: row.try_get("address_line")?,
                city: row.try_get("city")?,
                district: row.try_get("district")?,
                postal_code: row.try_get("postal_code")?,
            },
            items_total: try_get_amount(row, "items_total")?,
            discount: try_get_amount(row, "discount")?,
            coupon_code: row.try_get("coupon_code")?,
            subtotal: try_get_amount(row, "subtotal")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            cod_fee: try_get_amount(row, "cod_fee")?,
            total: try_get_amount(row, "total")?,
            payment_method: try_get_parsed(row, "payment_method")?,
            shipping_method: try_get_parsed(row, "shipping_method")?,
            tracking_number: row.try_get("tracking_number")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
