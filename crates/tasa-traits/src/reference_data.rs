//! Reference data source traits.
//!
//! - [`ScheduleSource`]: per-instrument payment schedules
//!
//! Schedules are static: they change only when an instrument is restructured.

use async_trait::async_trait;
use tasa_core::CashFlowEvent;

use crate::error::TraitError;
use crate::ids::Ticker;

/// Trait for payment schedule providers.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Get the scheduled interest and principal payments of `ticker`,
    /// ordered by date.
    ///
    /// Fails with [`TraitError::NotFound`] for an unknown ticker and
    /// [`TraitError::ScheduleParse`] for malformed or empty data.
    async fn schedule(&self, ticker: &Ticker) -> Result<Vec<CashFlowEvent>, TraitError>;
}
