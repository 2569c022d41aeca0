//! Update command implementation.
//!
//! Runs the valuation pipeline over a set of tickers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use tracing::info;

use tasa_engine::ValuationPipeline;
use tasa_ext_file::{CsvPriceSource, CsvScheduleSource};
use tasa_ext_web::WebPriceSource;
use tasa_traits::{PriceSource, Ticker};

use crate::cli::OutputFormat;
use crate::commands::parse_datetime;
use crate::config::TasaConfig;
use crate::error::CliResult;
use crate::output::{print_summary, summarize};

/// Arguments for the update command.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Tickers to value (default: from config, else AL29 AL30 AL35 AE38 AL41)
    pub tickers: Vec<String>,

    /// Price site: rava, eco, or a site from the config file
    #[arg(short, long)]
    pub site: Option<String>,

    /// Directory with <TICKER>.DAT schedules
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Read prices from a ticker,price CSV instead of the site
    #[arg(long)]
    pub prices_file: Option<PathBuf>,

    /// Quote the dollar-denominated line (<TICKER>D), the default
    #[arg(long, overrides_with = "no_dollar")]
    pub dollar: bool,

    /// Quote the base (peso) line instead of <TICKER>D
    #[arg(long, overrides_with = "dollar")]
    pub no_dollar: bool,

    /// Purchase date, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS (default: now)
    #[arg(long)]
    pub valuation_date: Option<String>,

    /// Compounding periods per year for modified duration
    #[arg(long)]
    pub periods: Option<f64>,

    /// Price request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Tickers valued at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl UpdateArgs {
    /// Applies command-line overrides on top of the file configuration.
    fn apply(&self, config: &mut TasaConfig) -> CliResult<()> {
        if !self.tickers.is_empty() {
            config.tickers = self.tickers.clone();
        }
        if let Some(site) = &self.site {
            config.site = site.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(file) = &self.prices_file {
            config.prices_file = Some(file.clone());
        }
        if self.dollar {
            config.pipeline.dollar_denominated = true;
        }
        if self.no_dollar {
            config.pipeline.dollar_denominated = false;
        }
        if let Some(date) = &self.valuation_date {
            config.pipeline.valuation_date = Some(parse_datetime(date)?);
        }
        if let Some(periods) = self.periods {
            config.pipeline.periods = periods;
        }
        if let Some(timeout) = self.timeout_ms {
            config.pipeline.price_timeout_ms = timeout;
        }
        if let Some(concurrency) = self.concurrency {
            config.pipeline.max_concurrency = concurrency;
        }
        Ok(())
    }
}

/// Wires the price and schedule sources into a pipeline.
fn build_pipeline(config: &TasaConfig) -> CliResult<ValuationPipeline> {
    let prices: Arc<dyn PriceSource> = match &config.prices_file {
        Some(path) => Arc::new(CsvPriceSource::new(path)?),
        None => {
            let site = config.resolve_site(&config.site)?;
            info!(site = %site, "scraping prices");
            Arc::new(WebPriceSource::with_timeout(
                site,
                config.pipeline.price_timeout(),
            )?)
        }
    };
    let schedules = Arc::new(CsvScheduleSource::new(&config.data_dir)?);

    let pipeline = ValuationPipeline::builder()
        .with_config(config.pipeline.clone())
        .with_prices(prices)
        .with_schedules(schedules)
        .build()?;
    Ok(pipeline)
}

/// Execute the update command.
pub async fn execute(
    args: UpdateArgs,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = TasaConfig::load(config_path)?;
    args.apply(&mut config)?;

    let pipeline = build_pipeline(&config)?;

    let handle = pipeline.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let tickers: Vec<Ticker> = config.tickers.iter().map(Ticker::new).collect();
    let run = pipeline.update(&tickers).await;

    let (rows, failures) = summarize(&run);
    print_summary(&rows, &failures, format)?;

    if rows.is_empty() && !failures.is_empty() {
        anyhow::bail!("no ticker could be valued");
    }
    Ok(())
}
