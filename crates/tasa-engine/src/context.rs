//! Per-run valuation context.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tasa_analytics::risk::duration::Durations;
use tasa_core::Timeline;
use tasa_traits::Ticker;

use crate::error::{EngineError, FaultKind, Stage};

/// Valuation of one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Instrument
    pub ticker: Ticker,
    /// Run timestamp
    pub as_of: DateTime<Utc>,
    /// Purchase price used
    pub price: f64,
    /// Internal rate of return
    pub irr: f64,
    /// Macaulay duration in years
    pub macaulay_duration: f64,
    /// Modified duration in years
    pub modified_duration: f64,
}

/// Why a ticker has no result.
#[derive(Debug, Clone)]
pub struct Failure {
    /// Stage that failed.
    pub stage: Stage,
    /// Error raised by that stage.
    pub error: EngineError,
}

impl Failure {
    /// Creates a failure at `stage`.
    pub fn new(stage: Stage, error: impl Into<EngineError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }

    /// Classification of the error.
    pub fn kind(&self) -> FaultKind {
        self.error.fault_kind()
    }
}

/// Everything one ticker's task produced, including partial state.
#[derive(Debug)]
pub(crate) struct TickerOutcome {
    pub ticker: Ticker,
    pub price: Option<f64>,
    pub timeline: Option<Timeline>,
    pub irr: Option<f64>,
    pub durations: Option<Durations>,
    pub result: Option<ValuationResult>,
    pub failure: Option<Failure>,
}

impl TickerOutcome {
    pub fn new(ticker: Ticker) -> Self {
        Self {
            ticker,
            price: None,
            timeline: None,
            irr: None,
            durations: None,
            result: None,
            failure: None,
        }
    }

    pub fn fail(mut self, stage: Stage, error: impl Into<EngineError>) -> Self {
        self.failure = Some(Failure::new(stage, error));
        self
    }
}

/// State of one `update` run, keyed by ticker.
///
/// Intermediate maps keep whatever each ticker reached before failing, so a
/// ticker may have a price but no result.
#[derive(Debug, Clone)]
pub struct ValuationRun {
    as_of: DateTime<Utc>,
    prices: BTreeMap<Ticker, f64>,
    timelines: BTreeMap<Ticker, Timeline>,
    irrs: BTreeMap<Ticker, f64>,
    macaulay_durations: BTreeMap<Ticker, f64>,
    modified_durations: BTreeMap<Ticker, f64>,
    results: BTreeMap<Ticker, ValuationResult>,
    failures: BTreeMap<Ticker, Failure>,
    cancelled: bool,
}

impl ValuationRun {
    pub(crate) fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            as_of,
            prices: BTreeMap::new(),
            timelines: BTreeMap::new(),
            irrs: BTreeMap::new(),
            macaulay_durations: BTreeMap::new(),
            modified_durations: BTreeMap::new(),
            results: BTreeMap::new(),
            failures: BTreeMap::new(),
            cancelled: false,
        }
    }

    pub(crate) fn record(&mut self, outcome: TickerOutcome) {
        let ticker = outcome.ticker;
        if let Some(price) = outcome.price {
            self.prices.insert(ticker.clone(), price);
        }
        if let Some(timeline) = outcome.timeline {
            self.timelines.insert(ticker.clone(), timeline);
        }
        if let Some(irr) = outcome.irr {
            self.irrs.insert(ticker.clone(), irr);
        }
        if let Some(durations) = outcome.durations {
            self.macaulay_durations
                .insert(ticker.clone(), durations.macaulay);
            self.modified_durations
                .insert(ticker.clone(), durations.modified);
        }
        if let Some(result) = outcome.result {
            self.results.insert(ticker.clone(), result);
        }
        if let Some(failure) = outcome.failure {
            self.failures.insert(ticker, failure);
        }
    }

    pub(crate) fn record_failure(&mut self, ticker: Ticker, failure: Failure) {
        self.failures.insert(ticker, failure);
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    /// Whether this ticker has either a result or a failure.
    pub fn is_settled(&self, ticker: &Ticker) -> bool {
        self.results.contains_key(ticker) || self.failures.contains_key(ticker)
    }

    /// Run timestamp.
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Parsed prices.
    pub fn prices(&self) -> &BTreeMap<Ticker, f64> {
        &self.prices
    }

    /// Timelines with the purchase inserted.
    pub fn timelines(&self) -> &BTreeMap<Ticker, Timeline> {
        &self.timelines
    }

    /// Solved rates.
    pub fn irrs(&self) -> &BTreeMap<Ticker, f64> {
        &self.irrs
    }

    /// Macaulay durations.
    pub fn macaulay_durations(&self) -> &BTreeMap<Ticker, f64> {
        &self.macaulay_durations
    }

    /// Modified durations.
    pub fn modified_durations(&self) -> &BTreeMap<Ticker, f64> {
        &self.modified_durations
    }

    /// Complete valuations.
    pub fn results(&self) -> &BTreeMap<Ticker, ValuationResult> {
        &self.results
    }

    /// Tickers that did not complete, with the failing stage.
    pub fn failures(&self) -> &BTreeMap<Ticker, Failure> {
        &self.failures
    }

    /// Whether the run was cut short by cancellation.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }
}
