//! Output formatting utilities.

use chrono::Local;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use tasa_engine::{Failure, ValuationResult, ValuationRun};

use crate::cli::OutputFormat;

/// One valued ticker in the summary.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Price", display_with = "fmt_price")]
    pub price: f64,
    #[tabled(rename = "IRR", display_with = "fmt_percent")]
    pub irr: f64,
    #[tabled(rename = "MDur", display_with = "fmt_years")]
    pub mdur: f64,
    #[tabled(rename = "Macaulay", display_with = "fmt_years")]
    pub macaulay: f64,
}

impl From<&ValuationResult> for SummaryRow {
    fn from(result: &ValuationResult) -> Self {
        Self {
            ticker: result.ticker.to_string(),
            date: result
                .as_of
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            price: result.price,
            irr: result.irr,
            mdur: result.modified_duration,
            macaulay: result.macaulay_duration,
        }
    }
}

/// One ticker that could not be valued.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct FailureRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Stage")]
    pub stage: String,
    #[tabled(rename = "Kind")]
    pub kind: String,
    #[tabled(rename = "Error")]
    pub error: String,
}

impl FailureRow {
    pub fn new(ticker: impl Into<String>, failure: &Failure) -> Self {
        Self {
            ticker: ticker.into(),
            stage: failure.stage.to_string(),
            kind: failure.kind().to_string(),
            error: failure.error.to_string(),
        }
    }
}

/// Summary rows and failure rows of a run, in ticker order.
pub fn summarize(run: &ValuationRun) -> (Vec<SummaryRow>, Vec<FailureRow>) {
    let rows = run.results().values().map(SummaryRow::from).collect();
    let failures = run
        .failures()
        .iter()
        .map(|(ticker, failure)| FailureRow::new(ticker.as_str(), failure))
        .collect();
    (rows, failures)
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    results: &'a [SummaryRow],
    failures: &'a [FailureRow],
}

/// Prints the summary in `format`.
///
/// For CSV and minimal output only the valued rows go to stdout; failures
/// are reported on stderr.
pub fn print_summary(
    rows: &[SummaryRow],
    failures: &[FailureRow],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_table(rows);
            if !failures.is_empty() {
                println!("\nFailures:");
                print_table(failures);
            }
        }
        OutputFormat::Json => {
            let summary = JsonSummary {
                results: rows,
                failures,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Csv => {
            print_csv(rows)?;
            print_failures_stderr(failures);
        }
        OutputFormat::Minimal => {
            for row in rows {
                println!("{} {:.6}", row.ticker, row.irr);
            }
            print_failures_stderr(failures);
        }
    }
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{table}");
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_failures_stderr(failures: &[FailureRow]) {
    for f in failures {
        eprintln!("{}: {} failed ({}): {}", f.ticker, f.stage, f.kind, f.error);
    }
}

fn fmt_price(value: &f64) -> String {
    format!("{value:.2}")
}

fn fmt_percent(value: &f64) -> String {
    format!("{:.2}%", value * 100.0)
}

fn fmt_years(value: &f64) -> String {
    format!("{value:.3}")
}
