//! Macaulay duration calculation.
//!
//! The purchase event anchors the timeline at `t = 0`, so it contributes
//! nothing to the time-weighted sum. The denominator is the present value
//! of every flow after it.
//!
//! ## Formula
//!
//! ```text
//! D_mac = Σ_{i>=0} t_i × PV_i / Σ_{i>=1} PV_i
//! ```
//!
//! where `PV_i = CF_i / (1 + irr)^t_i`.

use tasa_core::{TasaError, TasaResult, Timeline};

use crate::yields::discounted_flows;

/// Below this the flows after purchase are treated as worthless.
const MIN_TAIL_PV: f64 = 1e-10;

/// Calculate Macaulay duration of a timeline at its IRR.
///
/// The first event must be the purchase; any other ordering (a schedule row
/// dated before the valuation date) is rejected with
/// [`TasaError::Schedule`]. Fails with [`TasaError::Duration`] when the
/// present value of the remaining flows is zero or not finite.
pub fn macaulay_duration(timeline: &Timeline, irr: f64) -> TasaResult<f64> {
    match timeline.events().first() {
        Some(first) if first.is_purchase() => {}
        Some(first) => {
            return Err(TasaError::schedule(format!(
                "first event on {} is not the purchase",
                first.date()
            )));
        }
        None => return Err(TasaError::schedule("timeline has no events")),
    }

    let flows = discounted_flows(timeline);
    let mut weighted_sum = 0.0;
    let mut tail_pv = 0.0;
    for (i, (pv, t)) in flows.present_values(irr).zip(&flows.times).enumerate() {
        weighted_sum += pv * t;
        if i > 0 {
            tail_pv += pv;
        }
    }

    if !tail_pv.is_finite() || tail_pv.abs() < MIN_TAIL_PV {
        return Err(TasaError::duration(format!(
            "present value of flows after purchase is {tail_pv} at rate {irr}"
        )));
    }

    let duration = weighted_sum / tail_pv;
    if !duration.is_finite() {
        return Err(TasaError::duration(format!(
            "non-finite duration at rate {irr}"
        )));
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cashflows::CashFlowBuilder;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tasa_core::CashFlowEvent;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn row(y: i32, m: u32, d: u32, interest: Decimal, principal: Decimal) -> CashFlowEvent {
        CashFlowEvent::scheduled(NaiveDate::from_ymd_opt(y, m, d).unwrap(), interest, principal)
    }

    #[test]
    fn test_zero_coupon_duration_is_maturity() {
        let schedule = [row(2027, 1, 1, dec!(0), dec!(100))];
        let timeline =
            CashFlowBuilder::with_purchase_price(&schedule, 80.0, Some(midnight(2025, 1, 1)))
                .unwrap();

        // Any rate: a single flow's duration is its time
        let duration = macaulay_duration(&timeline, 0.07).unwrap();

        assert_relative_eq!(duration, 730.0 / 365.0, epsilon = 1e-12);
    }

    #[test]
    fn test_two_flows() {
        let schedule = [
            row(2026, 1, 1, dec!(10), dec!(0)),
            row(2027, 1, 1, dec!(10), dec!(100)),
        ];
        let timeline =
            CashFlowBuilder::with_purchase_price(&schedule, 100.0, Some(midnight(2025, 1, 1)))
                .unwrap();
        let irr: f64 = 0.10;

        let pv1 = 10.0 / 1.1;
        let pv2 = 110.0 / 1.1_f64.powf(2.0);
        let expected = (pv1 * 1.0 + pv2 * 2.0) / (pv1 + pv2);

        assert_relative_eq!(
            macaulay_duration(&timeline, irr).unwrap(),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_rejects_schedule_row_before_purchase() {
        let schedule = [
            row(2024, 6, 1, dec!(1), dec!(0)),
            row(2027, 1, 1, dec!(0), dec!(100)),
        ];
        let timeline =
            CashFlowBuilder::with_purchase_price(&schedule, 80.0, Some(midnight(2025, 1, 1)))
                .unwrap();

        assert!(matches!(
            macaulay_duration(&timeline, 0.1),
            Err(TasaError::Schedule { .. })
        ));
    }

    #[test]
    fn test_zero_tail_value() {
        let schedule = [row(2026, 1, 1, dec!(0), dec!(0))];
        let timeline =
            CashFlowBuilder::with_purchase_price(&schedule, 80.0, Some(midnight(2025, 1, 1)))
                .unwrap();

        assert!(matches!(
            macaulay_duration(&timeline, 0.1),
            Err(TasaError::Duration { .. })
        ));
    }

    #[test]
    fn test_purchase_only() {
        let timeline =
            CashFlowBuilder::with_purchase_price(&[], 80.0, Some(midnight(2025, 1, 1))).unwrap();

        assert!(matches!(
            macaulay_duration(&timeline, 0.1),
            Err(TasaError::Duration { .. })
        ));
    }

    #[test]
    fn test_rate_outside_domain() {
        let schedule = [row(2027, 1, 1, dec!(0), dec!(100))];
        let timeline =
            CashFlowBuilder::with_purchase_price(&schedule, 80.0, Some(midnight(2025, 1, 1)))
                .unwrap();

        assert!(matches!(
            macaulay_duration(&timeline, -1.0),
            Err(TasaError::Duration { .. })
        ));
    }
}
