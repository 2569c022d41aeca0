//! Present value of a timeline at a flat annual rate.

use tasa_core::{TimeBasis, Timeline};

/// Year offsets and flow amounts of a timeline, in event order.
#[derive(Debug, Clone)]
pub(crate) struct DiscountedFlows {
    pub(crate) times: Vec<f64>,
    pub(crate) amounts: Vec<f64>,
}

impl DiscountedFlows {
    /// Present value of each flow at `rate`, NaN outside the domain.
    pub(crate) fn present_values(&self, rate: f64) -> impl Iterator<Item = f64> + '_ {
        let base = 1.0 + rate;
        let defined = rate.is_finite() && base > 0.0;
        self.times
            .iter()
            .zip(&self.amounts)
            .map(move |(t, amount)| {
                if defined {
                    amount / base.powf(*t)
                } else {
                    f64::NAN
                }
            })
    }

    /// Sum of present values at `rate`.
    pub(crate) fn npv(&self, rate: f64) -> f64 {
        if !(rate.is_finite() && rate > -1.0) {
            return f64::NAN;
        }
        self.present_values(rate).sum()
    }
}

pub(crate) fn discounted_flows(timeline: &Timeline) -> DiscountedFlows {
    DiscountedFlows {
        times: TimeBasis::year_fractions(timeline),
        amounts: timeline.iter().map(|e| e.amount_f64()).collect(),
    }
}

/// Net present value of `timeline` at annual rate `rate`.
///
/// Returns NaN when `rate <= -1` or `rate` is not finite, so callers must
/// check `is_finite` before using the value.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use tasa_analytics::{cashflows::CashFlowBuilder, yields::npv};
/// use tasa_core::CashFlowEvent;
///
/// let schedule = [CashFlowEvent::scheduled(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), dec!(0), dec!(110))];
/// let bought = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let timeline = CashFlowBuilder::with_purchase_price(&schedule, 100.0, Some(bought)).unwrap();
///
/// assert!(npv(&timeline, 0.10).abs() < 1e-10);
/// assert!(npv(&timeline, -1.0).is_nan());
/// ```
#[must_use]
pub fn npv(timeline: &Timeline, rate: f64) -> f64 {
    discounted_flows(timeline).npv(rate)
}
