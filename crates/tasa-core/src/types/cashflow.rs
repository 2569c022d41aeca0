//! Cash flow events and timelines.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TasaError, TasaResult};

/// Origin of a cash flow event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Row of the instrument's payment schedule
    Scheduled,
    /// Synthetic outflow representing the purchase at market price
    Purchase,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Scheduled => "Scheduled",
            EventKind::Purchase => "Purchase",
        };
        write!(f, "{name}")
    }
}

/// A dated cash flow split into interest and principal.
///
/// Events are immutable once created. Schedule rows are dated at midnight of
/// their calendar date; purchase events carry the full valuation timestamp.
///
/// # Example
///
/// ```rust
/// use tasa_core::types::{CashFlowEvent, EventKind};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let row = CashFlowEvent::scheduled(
///     NaiveDate::from_ymd_opt(2030, 7, 9).unwrap(),
///     dec!(0.25),
///     dec!(8),
/// );
/// assert_eq!(row.kind(), EventKind::Scheduled);
/// assert_eq!(row.amount(), dec!(8.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowEvent {
    date: NaiveDateTime,
    interest: Decimal,
    principal: Decimal,
    kind: EventKind,
}

impl CashFlowEvent {
    /// Creates a new event.
    #[must_use]
    pub fn new(date: NaiveDateTime, interest: Decimal, principal: Decimal, kind: EventKind) -> Self {
        Self {
            date,
            interest,
            principal,
            kind,
        }
    }

    /// Creates a schedule row dated at midnight of `date`.
    #[must_use]
    pub fn scheduled(date: NaiveDate, interest: Decimal, principal: Decimal) -> Self {
        Self::new(
            date.and_time(NaiveTime::MIN),
            interest,
            principal,
            EventKind::Scheduled,
        )
    }

    /// Creates a purchase event with zero interest.
    ///
    /// `principal` is the signed flow, so a purchase at price `p` is `-p`.
    #[must_use]
    pub fn purchase(date: NaiveDateTime, principal: Decimal) -> Self {
        Self::new(date, Decimal::ZERO, principal, EventKind::Purchase)
    }

    /// Returns the event timestamp.
    #[must_use]
    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Returns the interest component.
    #[must_use]
    pub fn interest(&self) -> Decimal {
        self.interest
    }

    /// Returns the principal component.
    #[must_use]
    pub fn principal(&self) -> Decimal {
        self.principal
    }

    /// Returns the event kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Returns true for the purchase event.
    #[must_use]
    pub fn is_purchase(&self) -> bool {
        self.kind == EventKind::Purchase
    }

    /// Total flow: interest plus principal.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.interest + self.principal
    }

    /// Total flow as `f64`, NaN if it cannot be represented.
    #[must_use]
    pub fn amount_f64(&self) -> f64 {
        self.amount().to_f64().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for CashFlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} + {}",
            self.date, self.kind, self.interest, self.principal
        )
    }
}

/// Events ordered by non-decreasing date.
///
/// The first event is the anchor for year-fraction computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    events: Vec<CashFlowEvent>,
}

impl Timeline {
    /// Wraps events that are already sorted by date.
    ///
    /// Fails if `events` is empty or out of order.
    pub fn from_sorted(events: Vec<CashFlowEvent>) -> TasaResult<Self> {
        if events.is_empty() {
            return Err(TasaError::schedule("timeline has no events"));
        }
        if let Some(pair) = events.windows(2).find(|w| w[1].date < w[0].date) {
            return Err(TasaError::schedule(format!(
                "events out of order: {} after {}",
                pair[1].date, pair[0].date
            )));
        }
        log::trace!("timeline of {} events anchored at {}", events.len(), events[0].date);
        Ok(Self { events })
    }

    /// Returns the events as a slice.
    #[must_use]
    pub fn events(&self) -> &[CashFlowEvent] {
        &self.events
    }

    /// Returns the anchor timestamp (first event).
    #[must_use]
    pub fn anchor(&self) -> Option<NaiveDateTime> {
        self.events.first().map(CashFlowEvent::date)
    }

    /// Returns the first purchase event, if any.
    #[must_use]
    pub fn purchase(&self) -> Option<&CashFlowEvent> {
        self.events.iter().find(|e| e.is_purchase())
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if there are no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns an iterator over the events.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlowEvent> {
        self.events.iter()
    }

    /// Sum of all flows, purchase included.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.events.iter().map(CashFlowEvent::amount).sum()
    }

    /// Consumes the timeline and returns its events.
    #[must_use]
    pub fn into_events(self) -> Vec<CashFlowEvent> {
        self.events
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a CashFlowEvent;
    type IntoIter = std::slice::Iter<'a, CashFlowEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_scheduled_event_at_midnight() {
        let cf = CashFlowEvent::scheduled(date(2025, 7, 9), dec!(0.5), dec!(4));
        assert_eq!(cf.date(), date(2025, 7, 9).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(cf.amount(), dec!(4.5));
        assert!(!cf.is_purchase());
    }

    #[test]
    fn test_purchase_event() {
        let at = date(2025, 1, 2).and_hms_opt(14, 30, 0).unwrap();
        let cf = CashFlowEvent::purchase(at, dec!(-61.25));
        assert!(cf.is_purchase());
        assert_eq!(cf.interest(), Decimal::ZERO);
        assert_eq!(cf.amount(), dec!(-61.25));
        assert!((cf.amount_f64() + 61.25).abs() < 1e-12);
    }

    #[test]
    fn test_timeline_rejects_empty() {
        assert!(matches!(
            Timeline::from_sorted(Vec::new()),
            Err(TasaError::Schedule { .. })
        ));
    }

    #[test]
    fn test_timeline_rejects_out_of_order() {
        let events = vec![
            CashFlowEvent::scheduled(date(2026, 1, 1), dec!(1), dec!(0)),
            CashFlowEvent::scheduled(date(2025, 1, 1), dec!(1), dec!(0)),
        ];
        assert!(Timeline::from_sorted(events).is_err());
    }

    #[test]
    fn test_timeline_accepts_duplicate_dates() {
        let events = vec![
            CashFlowEvent::scheduled(date(2025, 1, 1), dec!(1), dec!(0)),
            CashFlowEvent::scheduled(date(2025, 1, 1), dec!(0), dec!(50)),
        ];
        let timeline = Timeline::from_sorted(events).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.total(), dec!(51));
        assert!(timeline.purchase().is_none());
    }

    #[test]
    fn test_serde_roundtrip() {
        let cf = CashFlowEvent::scheduled(date(2029, 7, 9), dec!(0.5), dec!(10));
        let json = serde_json::to_string(&cf).unwrap();
        let back: CashFlowEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), EventKind::Scheduled);
        assert_eq!(back.date(), cf.date());
    }
}
