//! Valuation pipeline.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use dashmap::DashMap;
use tokio::sync::{broadcast, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use tasa_analytics::cashflows::CashFlowBuilder;
use tasa_analytics::risk::duration::DurationCalculator;
use tasa_analytics::yields::{YieldSolver, YieldSolverConfig};
use tasa_traits::{ParsedPrice, PriceSource, ScheduleSource, Ticker};

use crate::builder::ValuationPipelineBuilder;
use crate::config::PipelineConfig;
use crate::context::{Failure, TickerOutcome, ValuationResult, ValuationRun};
use crate::error::{EngineError, Stage};

/// Tickers valued when none are given.
pub const DEFAULT_TICKERS: [&str; 5] = ["AL29", "AL30", "AL35", "AE38", "AL41"];

/// [`DEFAULT_TICKERS`] as ticker ids.
pub fn default_tickers() -> Vec<Ticker> {
    DEFAULT_TICKERS.iter().map(|t| Ticker::new(*t)).collect()
}

/// Stops an in-flight [`ValuationPipeline::update`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: broadcast::Sender<()>,
}

impl CancelHandle {
    /// Aborts unfinished tickers of the current run.
    ///
    /// Tickers already valued keep their results. Has no effect when no run
    /// is in progress.
    pub fn cancel(&self) {
        let _ = self.tx.send(());
    }
}

/// State shared by every ticker task of a pipeline.
struct Shared {
    config: PipelineConfig,
    prices: Arc<dyn PriceSource>,
    schedules: Arc<dyn ScheduleSource>,
    solver: YieldSolver,
    durations: DurationCalculator,
}

impl Shared {
    async fn fetch_price(&self, ticker: &Ticker) -> Result<f64, EngineError> {
        let quoted = if self.config.dollar_denominated {
            ticker.dollar_denominated()
        } else {
            ticker.clone()
        };

        let budget = self.config.price_timeout();
        let parsed = tokio::time::timeout(budget, self.prices.price(&quoted))
            .await
            .map_err(|_| EngineError::Timeout(budget))??;

        match parsed {
            ParsedPrice::Value(price) => Ok(price),
            ParsedPrice::NotANumber { raw } => Err(EngineError::NotANumber { raw }),
        }
    }
}

/// Values a set of tickers: price, timeline, IRR, durations.
///
/// Each ticker runs as its own task. A failing ticker is recorded in the
/// run's failures with the stage it failed at; the others carry on.
pub struct ValuationPipeline {
    shared: Arc<Shared>,
    cancel_tx: broadcast::Sender<()>,
}

impl ValuationPipeline {
    /// Create a new pipeline.
    pub fn new(
        config: PipelineConfig,
        prices: Arc<dyn PriceSource>,
        schedules: Arc<dyn ScheduleSource>,
    ) -> Self {
        let (cancel_tx, _) = broadcast::channel(1);
        let solver = YieldSolver::new(
            YieldSolverConfig::default().with_initial_guess(config.initial_guess),
        );
        let durations = DurationCalculator::new(config.periods);

        Self {
            shared: Arc::new(Shared {
                config,
                prices,
                schedules,
                solver,
                durations,
            }),
            cancel_tx,
        }
    }

    /// Start building a pipeline.
    pub fn builder() -> ValuationPipelineBuilder {
        ValuationPipelineBuilder::new()
    }

    /// Pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.shared.config
    }

    /// Handle that cancels runs of this pipeline.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: self.cancel_tx.clone(),
        }
    }

    /// Values [`DEFAULT_TICKERS`].
    pub async fn update_default(&self) -> ValuationRun {
        self.update(&default_tickers()).await
    }

    /// Values `tickers`. Repeated tickers are valued once.
    ///
    /// Every ticker ends up with either a result or a failure.
    pub async fn update(&self, tickers: &[Ticker]) -> ValuationRun {
        let as_of = Utc::now();
        let purchase_date = self
            .shared
            .config
            .valuation_date
            .unwrap_or_else(|| as_of.with_timezone(&Local).naive_local());

        let mut cancel_rx = self.cancel_tx.subscribe();
        let semaphore = Arc::new(Semaphore::new(self.shared.config.max_concurrency));
        let progress: Arc<DashMap<Ticker, Stage>> = Arc::new(DashMap::new());

        let mut seen = BTreeSet::new();
        let unique: Vec<Ticker> = tickers
            .iter()
            .filter(|t| seen.insert((*t).clone()))
            .cloned()
            .collect();

        info!(
            tickers = unique.len(),
            purchase_date = %purchase_date,
            "starting valuation run"
        );

        let mut tasks = JoinSet::new();
        for ticker in &unique {
            tasks.spawn(value_ticker(
                Arc::clone(&self.shared),
                Arc::clone(&semaphore),
                Arc::clone(&progress),
                ticker.clone(),
                as_of,
                purchase_date,
            ));
        }

        let mut run = ValuationRun::new(as_of);
        loop {
            tokio::select! {
                biased;
                _ = cancel_rx.recv() => {
                    warn!(pending = tasks.len(), "valuation run cancelled");
                    tasks.abort_all();
                    run.mark_cancelled();
                    while let Some(joined) = tasks.join_next().await {
                        if let Ok(outcome) = joined {
                            record(&mut run, outcome);
                        }
                    }
                    break;
                }
                joined = tasks.join_next() => match joined {
                    Some(Ok(outcome)) => record(&mut run, outcome),
                    Some(Err(e)) if e.is_cancelled() => {}
                    Some(Err(e)) => warn!(error = %e, "valuation task panicked"),
                    None => break,
                }
            }
        }

        for ticker in &unique {
            if run.is_settled(ticker) {
                continue;
            }
            let stage = progress
                .get(ticker)
                .map_or(Stage::FetchPrice, |entry| *entry.value());
            let error = if run.was_cancelled() {
                EngineError::Cancelled
            } else {
                EngineError::Internal("valuation task did not complete".into())
            };
            run.record_failure(ticker.clone(), Failure::new(stage, error));
        }

        info!(
            valued = run.results().len(),
            failed = run.failures().len(),
            "valuation run finished"
        );
        run
    }
}

fn record(run: &mut ValuationRun, outcome: TickerOutcome) {
    match &outcome.failure {
        Some(failure) => warn!(
            ticker = %outcome.ticker,
            stage = %failure.stage,
            kind = %failure.kind(),
            error = %failure.error,
            "ticker valuation failed"
        ),
        None => debug!(ticker = %outcome.ticker, "ticker valued"),
    }
    run.record(outcome);
}

async fn value_ticker(
    shared: Arc<Shared>,
    semaphore: Arc<Semaphore>,
    progress: Arc<DashMap<Ticker, Stage>>,
    ticker: Ticker,
    as_of: DateTime<Utc>,
    purchase_date: NaiveDateTime,
) -> TickerOutcome {
    let mut outcome = TickerOutcome::new(ticker.clone());
    let enter = |stage: Stage| {
        debug!(ticker = %ticker, stage = %stage, "entering stage");
        progress.insert(ticker.clone(), stage);
    };

    let Ok(_permit) = semaphore.acquire_owned().await else {
        return outcome.fail(Stage::FetchPrice, EngineError::Cancelled);
    };

    enter(Stage::FetchPrice);
    let price = match shared.fetch_price(&ticker).await {
        Ok(price) => price,
        Err(e) => return outcome.fail(Stage::FetchPrice, e),
    };
    outcome.price = Some(price);

    enter(Stage::BuildTimeline);
    let schedule = match shared.schedules.schedule(&ticker).await {
        Ok(schedule) => schedule,
        Err(e) => return outcome.fail(Stage::BuildTimeline, e),
    };
    let timeline = match CashFlowBuilder::with_purchase_price(&schedule, price, Some(purchase_date))
    {
        Ok(timeline) => timeline,
        Err(e) => return outcome.fail(Stage::BuildTimeline, e),
    };
    outcome.timeline = Some(timeline.clone());

    enter(Stage::SolveYield);
    let irr = match shared.solver.solve(&timeline) {
        Ok(irr) => irr,
        Err(e) => return outcome.fail(Stage::SolveYield, e),
    };
    outcome.irr = Some(irr);

    enter(Stage::ComputeDurations);
    let durations = match shared.durations.compute(&timeline, irr) {
        Ok(durations) => durations,
        Err(e) => return outcome.fail(Stage::ComputeDurations, e),
    };
    outcome.durations = Some(durations);

    enter(Stage::AssembleResult);
    let result = ValuationResult {
        ticker: ticker.clone(),
        as_of,
        price,
        irr,
        macaulay_duration: durations.macaulay,
        modified_duration: durations.modified,
    };
    if ![result.irr, result.macaulay_duration, result.modified_duration]
        .iter()
        .all(|v| v.is_finite())
    {
        return outcome.fail(
            Stage::AssembleResult,
            EngineError::Internal(format!("non-finite figures for {ticker}")),
        );
    }
    outcome.result = Some(result);
    outcome
}
