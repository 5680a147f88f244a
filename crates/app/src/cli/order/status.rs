use clap::Args;
use storefront::{orders::OrderStatus, pricing::PricingConfig};
use storefront_app::domain::orders::{OrdersService, PgOrdersService, side_effects::SideEffects};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    /// Order number
    #[arg(long)]
    number: String,

    /// Target status: confirmed, preparing, shipped, delivered or cancelled
    #[arg(long)]
    status: OrderStatus,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let orders = PgOrdersService::new(
        db.clone(),
        PricingConfig::default(),
        SideEffects::disabled(),
    );

    let order = orders
        .update_status(&args.number, args.status)
        .await
        .map_err(|error| format!("failed to update status: {error}"))?;

    super::print_order(&order);

    db.close().await;

    Ok(())
}
