//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use storefront::{
    cart::CheckoutLine,
    orders::OrderStatus,
    pricing::{PriceBreakdown, PricedLine, PricingConfig, PricingOptions, price_lines},
};
use tracing::{Span, info, instrument, warn};

use crate::{
    database::Db,
    domain::{
        catalog::records::VariantUuid,
        orders::{
            data::{CheckoutRequest, NewOrder, OrderFilter},
            errors::OrdersServiceError,
            numbers::{OrderNumbers, RandomOrderNumbers, is_order_number},
            records::{OrderDetails, OrderRecord, OrderUuid, PlacedOrder},
            repositories::{PgOrderItemsRepository, PgOrdersRepository, PgStockRepository},
            side_effects::SideEffects,
            validation::ValidationError,
        },
        pricing::{
            lines::{assemble_lines, variant_uuids},
            records::VariantLineRecord,
            repository::PgPricingRepository,
        },
    },
};

/// Attempts at placing an order before giving up on order number collisions.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    config: PricingConfig,
    numbers: Arc<dyn OrderNumbers>,
    side_effects: SideEffects,
    max_attempts: u32,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    stock: PgStockRepository,
    pricing: PgPricingRepository,
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("config", &self.config)
            .field("side_effects", &self.side_effects)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, config: PricingConfig, side_effects: SideEffects) -> Self {
        Self {
            db,
            config,
            numbers: Arc::new(RandomOrderNumbers),
            side_effects,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            stock: PgStockRepository::new(),
            pricing: PgPricingRepository::new(),
        }
    }

    #[must_use]
    pub fn with_order_numbers(mut self, numbers: Arc<dyn OrderNumbers>) -> Self {
        self.numbers = numbers;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// One checkout attempt in its own transaction. Nothing persists unless it commits.
    async fn try_place_order(
        &self,
        request: &CheckoutRequest,
        requested: &[CheckoutLine],
    ) -> Result<(OrderDetails, PriceBreakdown), OrdersServiceError> {
        let at = Timestamp::now();

        let mut tx = self.db.begin().await?;

        let locked = self
            .stock
            .lock_variant_lines(&mut tx, &variant_uuids(requested))
            .await?;

        let lines =
            assemble_lines(requested, &locked).map_err(OrdersServiceError::VariantNotFound)?;

        check_availability(&lines, &locked)?;

        let inputs = self.pricing.pricing_inputs(&mut tx, at).await?;

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

        let order = self
            .orders
            .create_order(
                &mut tx,
                NewOrder {
                    uuid: OrderUuid::new(),
                    order_number: self.numbers.generate(at),
                    request,
                    breakdown: &breakdown,
                },
            )
            .await?;

        let items = self
            .items
            .create_order_items(&mut tx, order.uuid, &lines)
            .await?;

        for line in &lines {
            let variant = VariantUuid::from_uuid(line.variant_uuid);

            let rows_affected = self
                .stock
                .decrement_stock(&mut tx, variant, line.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(insufficient_stock(line, remaining(&locked, variant)));
            }
        }

        tx.commit().await?;

        Ok((OrderDetails { order, items }, breakdown))
    }
}

/// Availability first, then stock, so a withdrawn variant never reads as "out of stock".
fn check_availability(
    lines: &[PricedLine],
    locked: &[VariantLineRecord],
) -> Result<(), OrdersServiceError> {
    if let Some(line) = lines.iter().find(|line| !line.available) {
        return Err(OrdersServiceError::ItemUnavailable {
            variant_uuid: VariantUuid::from_uuid(line.variant_uuid),
            product_name: line.product_name.clone(),
        });
    }

    for line in lines {
        let stock = remaining(locked, VariantUuid::from_uuid(line.variant_uuid));

        if stock < line.quantity {
            return Err(insufficient_stock(line, stock));
        }
    }

    Ok(())
}

fn remaining(locked: &[VariantLineRecord], variant: VariantUuid) -> u32 {
    locked
        .iter()
        .find(|record| record.variant_uuid == variant)
        .map_or(0, |record| record.stock)
}

fn insufficient_stock(line: &PricedLine, remaining: u32) -> OrdersServiceError {
    OrdersServiceError::InsufficientStock {
        variant_uuid: VariantUuid::from_uuid(line.variant_uuid),
        product_name: line.product_name.clone(),
        variant_name: line.variant_name.clone(),
        requested: line.quantity,
        remaining,
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[instrument(
        name = "orders.service.place_order",
        skip(self, request),
        fields(
            line_count = request.items.len(),
            payment_method = request.payment_method.as_str(),
            order_number = tracing::field::Empty,
            total = tracing::field::Empty,
        ),
        err
    )]
    async fn place_order(
        &self,
        request: CheckoutRequest,
    ) -> Result<PlacedOrder, OrdersServiceError> {
        let requested = request.validate()?;

        let mut attempt = 1;

        let (details, breakdown) = loop {
            match self.try_place_order(&request, &requested).await {
                Err(OrdersServiceError::OrderNumberCollision) if attempt < self.max_attempts => {
                    warn!(attempt, "order number collision, retrying");
                    attempt += 1;
                }
                result => break result?,
            }
        };

        Span::current()
            .record("order_number", details.order.order_number.as_str())
            .record("total", details.order.total);

        info!("order placed");

        let payment = self
            .side_effects
            .dispatch(&details, request.client_ip.as_deref())
            .await;

        Ok(PlacedOrder {
            details,
            breakdown,
            payment,
        })
    }

    #[instrument(name = "orders.service.get_order_by_number", skip(self), err)]
    async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<OrderDetails, OrdersServiceError> {
        if !is_order_number(order_number) {
            return Err(OrdersServiceError::NotFound);
        }

        let mut tx = self.db.begin().await?;

        let order = self.orders.get_order_by_number(&mut tx, order_number).await?;
        let items = self.items.get_order_items(&mut tx, order.uuid).await?;

        tx.commit().await?;

        Ok(OrderDetails { order, items })
    }

    #[instrument(name = "orders.service.list_orders", skip(self), err)]
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let filter = OrderFilter {
            limit: filter.limit.clamp(1, OrderFilter::MAX_LIMIT),
            ..filter
        };

        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[instrument(name = "orders.service.update_status", skip(self), err)]
    async fn update_status(
        &self,
        order_number: &str,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders.lock_order_by_number(&mut tx, order_number).await?;

        let next = order.status.transition(status)?;

        if next == OrderStatus::Cancelled {
            let items = self.items.get_order_items(&mut tx, order.uuid).await?;

            for item in &items {
                self.stock
                    .restock(&mut tx, item.variant_uuid, item.quantity)
                    .await?;
            }
        }

        let updated = self.orders.update_status(&mut tx, order.uuid, next).await?;

        tx.commit().await?;

        info!(from = %order.status, to = %next, "order status updated");

        Ok(updated)
    }

    #[instrument(name = "orders.service.set_tracking_number", skip(self), err)]
    async fn set_tracking_number(
        &self,
        order_number: &str,
        tracking_number: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let tracking_number = tracking_number.trim();

        if tracking_number.is_empty() {
            return Err(ValidationError::MissingField("tracking_number").into());
        }

        let mut tx = self.db.begin().await?;

        let order = self.orders.lock_order_by_number(&mut tx, order_number).await?;

        if !matches!(order.status, OrderStatus::Preparing | OrderStatus::Shipped) {
            return Err(OrdersServiceError::TrackingNotAllowed(order.status));
        }

        let updated = self
            .orders
            .set_tracking_number(&mut tx, order.uuid, tracking_number)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate, price, reserve stock for and persist an order, then run side effects.
    async fn place_order(&self, request: CheckoutRequest)
    -> Result<PlacedOrder, OrdersServiceError>;

    /// Guest order lookup by order number.
    async fn get_order_by_number(
        &self,
        order_number: &str,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// Orders newest first, optionally filtered by status.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order to a new status. Cancelling returns its stock.
    async fn update_status(
        &self,
        order_number: &str,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Attach a courier tracking number.
    async fn set_tracking_number(
        &self,
        order_number: &str,
        tracking_number: &str,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
