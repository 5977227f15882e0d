#![expect(
    clippy::print_stdout,
    reason = "command results are written to stdout"
)]

use clap::{Parser, Subcommand};

use platter_app::context::CartContext;

use crate::config::{LoggingConfig, StorageConfig};

mod cart;
mod event;
mod package;
mod sync;

#[derive(Debug, Parser)]
#[command(name = "platter", about = "Platter cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(flatten)]
    storage: StorageConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect and edit the local cart
    Cart(cart::CartCommand),

    /// Stage build-your-own packages
    Package(package::PackageCommand),

    /// Inspect the cached event details
    Event(event::EventCommand),

    /// Push the local cart to the catering API
    Sync(sync::SyncArgs),
}

impl Cli {
    /// Parse arguments, reading a `.env` file first when present.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let context = CartContext::from_storage_dir(self.storage.storage_dir);

        match self.command {
            Commands::Cart(command) => cart::run(&context, command),
            Commands::Package(command) => package::run(&context, command),
            Commands::Event(command) => event::run(&context, command),
            Commands::Sync(args) => sync::run(&context, args).await,
        }
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
