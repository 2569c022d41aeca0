//! IRR command implementation.
//!
//! Values a single schedule file at a given price, without any price source.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use clap::Args;

use tasa_analytics::prelude::*;
use tasa_engine::ValuationResult;
use tasa_ext_file::parse_schedule;
use tasa_traits::Ticker;

use crate::cli::OutputFormat;
use crate::commands::parse_datetime;
use crate::error::CliResult;
use crate::output::{print_summary, SummaryRow};

/// Arguments for the irr command.
#[derive(Args, Debug)]
pub struct IrrArgs {
    /// Schedule file (date,interest,principal rows, dates as dd/mm/yy)
    #[arg(short, long)]
    pub schedule: PathBuf,

    /// Purchase price
    #[arg(short, long, allow_negative_numbers = true)]
    pub price: f64,

    /// Purchase date, YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS (default: now)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Compounding periods per year for modified duration
    #[arg(long, default_value_t = DEFAULT_COMPOUNDING_PERIODS)]
    pub periods: f64,

    /// Starting rate for the IRR search
    #[arg(long, default_value_t = 0.10, allow_negative_numbers = true)]
    pub guess: f64,
}

/// Values the schedule file in `args` at its price.
fn value_schedule(args: &IrrArgs, as_of: DateTime<Utc>) -> CliResult<ValuationResult> {
    let date = match &args.date {
        Some(d) => parse_datetime(d)?,
        None => as_of.with_timezone(&Local).naive_local(),
    };

    let bytes = std::fs::read(&args.schedule)?;
    let schedule = parse_schedule(&bytes)?;

    let timeline = CashFlowBuilder::with_purchase_price(&schedule, args.price, Some(date))?;
    let solver = YieldSolver::new(YieldSolverConfig::default().with_initial_guess(args.guess));
    let irr = solver.solve(&timeline)?;
    let durations = DurationCalculator::new(args.periods).compute(&timeline, irr)?;

    let ticker = args
        .schedule
        .file_stem()
        .map_or_else(|| "-".to_string(), |s| s.to_string_lossy().into_owned());

    Ok(ValuationResult {
        ticker: Ticker::new(ticker),
        as_of,
        price: args.price,
        irr,
        macaulay_duration: durations.macaulay,
        modified_duration: durations.modified,
    })
}

/// Execute the irr command.
pub fn execute(args: IrrArgs, format: OutputFormat) -> Result<()> {
    let result = value_schedule(&args, Utc::now())?;
    print_summary(&[SummaryRow::from(&result)], &[], format)
}
