//! formcheck - validate form schemas before deployment

use anyhow::Context;
use clap::Parser;
use formcheck_cli::{
    cli::{Cli, Command},
    commands, logging, Config,
};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.logging.level = logging::level_for_verbosity(cli.verbose, &config.logging.level);

    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Starting formcheck");

    match &cli.command {
        Command::Validate(args) => commands::validate(&config, args).await,
        Command::Rules(args) => commands::rules(&config, args),
    }
}
