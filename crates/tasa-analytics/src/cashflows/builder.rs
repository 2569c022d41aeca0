//! Purchase-event insertion.

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use tasa_core::{CashFlowEvent, EventKind, TasaError, TasaResult, Timeline};

/// Builds valuation timelines from a schedule and a purchase.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashFlowBuilder;

impl CashFlowBuilder {
    /// Merges a purchase event `{date, interest, principal}` into `schedule`.
    ///
    /// `date = None` uses the current local timestamp. The result is sorted
    /// by date with a stable sort; on a date tie the purchase comes first.
    /// Duplicate schedule dates are kept as separate events. `schedule` is
    /// not modified.
    pub fn build(
        schedule: &[CashFlowEvent],
        interest: Decimal,
        principal: Decimal,
        date: Option<NaiveDateTime>,
    ) -> TasaResult<Timeline> {
        let date = date.unwrap_or_else(|| Local::now().naive_local());
        let purchase = CashFlowEvent::new(date, interest, principal, EventKind::Purchase);

        let mut events = Vec::with_capacity(schedule.len() + 1);
        events.push(purchase);
        events.extend_from_slice(schedule);
        events.sort_by_key(CashFlowEvent::date);

        log::debug!(
            "built timeline of {} events, purchase at {date}",
            events.len()
        );
        Timeline::from_sorted(events)
    }

    /// Merges a purchase at `price` (flow `{interest: 0, principal: -price}`).
    pub fn with_purchase_price(
        schedule: &[CashFlowEvent],
        price: f64,
        date: Option<NaiveDateTime>,
    ) -> TasaResult<Timeline> {
        if !price.is_finite() {
            return Err(TasaError::invalid_price(price, "price must be finite"));
        }
        let price = Decimal::from_f64_retain(price)
            .ok_or_else(|| TasaError::invalid_price(price, "not representable as a decimal"))?;

        Self::build(schedule, Decimal::ZERO, -price, date)
    }
}
