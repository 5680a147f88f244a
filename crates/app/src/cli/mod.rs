use clap::{Args, Parser, Subcommand};
use storefront_app::database::{self, Db};

mod db;
mod order;
mod variant;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Db(db::DbCommand),
    Order(order::OrderCommand),
    Variant(variant::VariantCommand),
}

/// Connection flags shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        database::connect(&self.database_url, 2)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Db(command) => db::run(command).await,
            Commands::Order(command) => order::run(command).await,
            Commands::Variant(command) => variant::run(command).await,
        }
    }
}
