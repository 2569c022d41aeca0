//! Tasa CLI - bond IRR and duration from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Value the default tickers with prices scraped from rava
//! tasa update
//!
//! # Another site, selected tickers
//! tasa update --site eco AL30 GD30
//!
//! # Offline run from a prices file keyed by base ticker (AL30, not AL30D)
//! tasa update --no-dollar --prices-file prices.csv --valuation-date 2024-06-30
//!
//! # One schedule file at a given price
//! tasa irr --schedule data/AL30.DAT --price 61.35
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "warn" } else { "info,tasa=debug" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Update(args) => {
            commands::update::execute(args, cli.config.as_deref(), format).await?;
        }
        Commands::Irr(args) => commands::irr::execute(args, format)?,
    }

    Ok(())
}
