use clap::{Args, Subcommand};

mod restock;

#[derive(Debug, Args)]
pub(crate) struct VariantCommand {
    #[command(subcommand)]
    command: VariantSubcommand,
}

#[derive(Debug, Subcommand)]
enum VariantSubcommand {
    /// Add units to a variant's stock
    Restock(restock::RestockArgs),
}

pub(crate) async fn run(command: VariantCommand) -> Result<(), String> {
    match command.command {
        VariantSubcommand::Restock(args) => restock::run(args).await,
    }
}
