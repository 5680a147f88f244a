//! Order Repositories

mod items;
mod orders;
mod stock;

pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::PgOrdersRepository;
pub(crate) use stock::PgStockRepository;
