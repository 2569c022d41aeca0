//! File-based schedule source.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use rust_decimal::Decimal;

use tasa_core::CashFlowEvent;
use tasa_traits::error::TraitError;
use tasa_traits::ids::Ticker;
use tasa_traits::reference_data::ScheduleSource;

/// File extension of schedule files.
pub const SCHEDULE_EXTENSION: &str = "DAT";

/// Date format of the first column (`09/07/30`).
///
/// Two-digit years follow chrono: `00`-`69` are 20xx and `70`-`99` are 19xx,
/// so `09/07/69` is 2069-07-09. C `strptime` pivots at 69 instead (1969).
pub const SCHEDULE_DATE_FORMAT: &str = "%d/%m/%y";

// =============================================================================
// CSV SCHEDULE SOURCE
// =============================================================================

/// Reads `<dir>/<TICKER>.DAT` payment schedules.
///
/// Each file has no header and one row per payment:
///
/// ```text
/// 09/07/21,0.0875,0
/// 09/01/22,0.5,0
/// 09/07/24,0.25,4
/// ```
///
/// Columns are date (`dd/mm/yy`), interest and principal. Parsed schedules
/// are cached until [`CsvScheduleSource::invalidate`] or
/// [`CsvScheduleSource::clear`] is called.
pub struct CsvScheduleSource {
    dir: PathBuf,
    schedules: DashMap<Ticker, Vec<CashFlowEvent>>,
}

impl CsvScheduleSource {
    /// Create a new schedule source over `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, TraitError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(TraitError::SourceNotAvailable(format!(
                "schedule directory {} does not exist",
                dir.display()
            )));
        }
        Ok(Self {
            dir,
            schedules: DashMap::new(),
        })
    }

    /// Directory holding the schedule files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the schedule file for `ticker`.
    pub fn path_for(&self, ticker: &Ticker) -> PathBuf {
        self.dir
            .join(format!("{}.{}", ticker.as_str(), SCHEDULE_EXTENSION))
    }

    /// Drop the cached schedule of `ticker`.
    pub fn invalidate(&self, ticker: &Ticker) {
        self.schedules.remove(ticker);
    }

    /// Drop every cached schedule.
    pub fn clear(&self) {
        self.schedules.clear();
    }

    async fn load(&self, ticker: &Ticker) -> Result<Vec<CashFlowEvent>, TraitError> {
        let path = self.path_for(ticker);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TraitError::NotFound(format!(
                    "no schedule for {ticker} at {}",
                    path.display()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let schedule = parse_schedule(&bytes)?;
        tracing::debug!(
            ticker = %ticker,
            rows = schedule.len(),
            path = %path.display(),
            "loaded schedule"
        );
        Ok(schedule)
    }
}

#[async_trait]
impl ScheduleSource for CsvScheduleSource {
    async fn schedule(&self, ticker: &Ticker) -> Result<Vec<CashFlowEvent>, TraitError> {
        if let Some(cached) = self.schedules.get(ticker) {
            return Ok(cached.clone());
        }

        let schedule = self.load(ticker).await?;
        self.schedules.insert(ticker.clone(), schedule.clone());
        Ok(schedule)
    }
}

/// Parse schedule rows from CSV bytes.
///
/// Rows are returned sorted by date; rows sharing a date keep file order.
pub fn parse_schedule(bytes: &[u8]) -> Result<Vec<CashFlowEvent>, TraitError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut schedule = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line() as usize);
            TraitError::schedule_parse(line, e.to_string())
        })?;
        let line = record.position().map_or(0, |p| p.line() as usize);

        // Blank lines
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.len() != 3 {
            return Err(TraitError::schedule_parse(
                line,
                format!("expected 3 fields (date,interest,principal), found {}", record.len()),
            ));
        }

        let date = NaiveDate::parse_from_str(&record[0], SCHEDULE_DATE_FORMAT).map_err(|e| {
            TraitError::schedule_parse(line, format!("bad date '{}': {e}", &record[0]))
        })?;
        let interest = parse_amount(&record[1], "interest", line)?;
        let principal = parse_amount(&record[2], "principal", line)?;

        schedule.push(CashFlowEvent::scheduled(date, interest, principal));
    }

    if schedule.is_empty() {
        return Err(TraitError::schedule_parse(0, "schedule has no rows"));
    }

    schedule.sort_by_key(CashFlowEvent::date);
    Ok(schedule)
}

fn parse_amount(field: &str, column: &str, line: usize) -> Result<Decimal, TraitError> {
    Decimal::from_str(field)
        .or_else(|_| Decimal::from_scientific(field))
        .map_err(|_| TraitError::schedule_parse(line, format!("bad {column} '{field}'")))
}
