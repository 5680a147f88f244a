use clap::Args;
use storefront::pricing::PricingConfig;
use storefront_app::domain::orders::{OrdersService, PgOrdersService, side_effects::SideEffects};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SetTrackingArgs {
    /// Order number
    #[arg(long)]
    number: String,

    /// Carrier tracking number
    #[arg(long)]
    tracking_number: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SetTrackingArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let orders = PgOrdersService::new(
        db.clone(),
        PricingConfig::default(),
        SideEffects::disabled(),
    );

    let order = orders
        .set_tracking_number(&args.number, &args.tracking_number)
        .await
        .map_err(|error| format!("failed to set tracking number: {error}"))?;

    super::print_order(&order);

    db.close().await;

    Ok(())
}
