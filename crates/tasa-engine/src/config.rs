//! Pipeline configuration.

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use tasa_analytics::risk::duration::DEFAULT_COMPOUNDING_PERIODS;

use crate::error::EngineError;

/// Settings for a [`ValuationPipeline`](crate::ValuationPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Compounding periods per year for modified duration.
    pub periods: f64,

    /// Starting rate for the IRR search.
    pub initial_guess: f64,

    /// Time budget for one price retrieval, in milliseconds.
    pub price_timeout_ms: u64,

    /// Tickers valued at the same time.
    pub max_concurrency: usize,

    /// Quote the dollar-denominated line (`<ticker>D`). On by default;
    /// prices are still stored under the base ticker.
    pub dollar_denominated: bool,

    /// Purchase date for every timeline. `None` uses the run timestamp.
    pub valuation_date: Option<NaiveDateTime>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            periods: DEFAULT_COMPOUNDING_PERIODS,
            initial_guess: 0.10,
            price_timeout_ms: 10_000,
            max_concurrency: 4,
            dollar_denominated: true,
            valuation_date: None,
        }
    }
}

impl PipelineConfig {
    /// Price retrieval budget.
    pub fn price_timeout(&self) -> Duration {
        Duration::from_millis(self.price_timeout_ms)
    }

    /// Rejects settings no run could succeed with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.periods.is_finite() && self.periods > 0.0) {
            return Err(EngineError::ConfigError(format!(
                "periods must be positive, got {}",
                self.periods
            )));
        }
        if !(self.initial_guess.is_finite() && self.initial_guess > -1.0) {
            return Err(EngineError::ConfigError(format!(
                "initial_guess must be above -1, got {}",
                self.initial_guess
            )));
        }
        if self.max_concurrency == 0 {
            return Err(EngineError::ConfigError(
                "max_concurrency must be at least 1".into(),
            ));
        }
        if self.price_timeout_ms == 0 {
            return Err(EngineError::ConfigError(
                "price_timeout_ms must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.periods, 2.0);
        assert_eq!(config.initial_guess, 0.10);
        assert_eq!(config.price_timeout(), Duration::from_secs(10));
        assert!(config.dollar_denominated);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let config = PipelineConfig {
            periods: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            initial_guess: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{"dollar_denominated": false, "valuation_date": "2024-01-01T00:00:00"}"#)
                .unwrap();
        assert!(!config.dollar_denominated);
        assert_eq!(config.max_concurrency, 4);
        assert!(config.valuation_date.is_some());
    }
}
