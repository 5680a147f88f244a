use clap::Args;
use storefront::pricing::PricingConfig;
use storefront_app::domain::orders::{OrdersService, PgOrdersService, side_effects::SideEffects};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowOrderArgs {
    /// Order number, e.g. SN-20260301-ABCDEF
    #[arg(long)]
    number: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ShowOrderArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let orders = PgOrdersService::new(
        db.clone(),
        PricingConfig::default(),
        SideEffects::disabled(),
    );

    let details = orders
        .get_order_by_number(&args.number)
        .await
        .map_err(|error| format!("failed to load order: {error}"))?;

    super::print_details(&details);

    db.close().await;

    Ok(())
}
