//! Platter cart CLI

use std::process::ExitCode;

use tracing::error;

use crate::cli::Cli;

mod cli;
mod config;
mod logging;

#[tokio::main]
pub async fn main() -> ExitCode {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = logging::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("failed to initialise logging: {error}");
        }

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");

            ExitCode::FAILURE
        }
    }
}
