//! Builder pattern for the valuation pipeline.

use std::sync::Arc;

use tasa_traits::{PriceSource, ScheduleSource};

use crate::config::PipelineConfig;
use crate::error::EngineError;
use crate::pipeline::ValuationPipeline;

/// Builder for constructing a [`ValuationPipeline`].
pub struct ValuationPipelineBuilder {
    config: Option<PipelineConfig>,
    prices: Option<Arc<dyn PriceSource>>,
    schedules: Option<Arc<dyn ScheduleSource>>,
}

impl ValuationPipelineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            prices: None,
            schedules: None,
        }
    }

    /// Set the pipeline configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the price source.
    pub fn with_prices(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.prices = Some(source);
        self
    }

    /// Set the schedule source.
    pub fn with_schedules(mut self, source: Arc<dyn ScheduleSource>) -> Self {
        self.schedules = Some(source);
        self
    }

    /// Build the pipeline.
    pub fn build(self) -> Result<ValuationPipeline, EngineError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let prices = self
            .prices
            .ok_or_else(|| EngineError::ConfigError("price source not configured".into()))?;

        let schedules = self
            .schedules
            .ok_or_else(|| EngineError::ConfigError("schedule source not configured".into()))?;

        Ok(ValuationPipeline::new(config, prices, schedules))
    }
}

impl Default for ValuationPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
