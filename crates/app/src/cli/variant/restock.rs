use clap::Args;
use storefront_app::domain::catalog::{CatalogService, PgCatalogService, records::VariantUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RestockArgs {
    /// Variant UUID
    #[arg(long)]
    variant_uuid: Uuid,

    /// Units to add
    #[arg(long)]
    quantity: u32,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: RestockArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let variant = PgCatalogService::new(db.clone())
        .restock_variant(VariantUuid::from_uuid(args.variant_uuid), args.quantity)
        .await
        .map_err(|error| format!("failed to restock variant: {error}"))?;

    println!("variant_uuid: {}", variant.uuid);
    println!("sku: {}", variant.sku);
    println!("stock: {}", variant.stock);

    db.close().await;

    Ok(())
}
