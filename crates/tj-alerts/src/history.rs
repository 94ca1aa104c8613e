//! Cross-pass evaluator state: the emission log and the daily counter.
//!
//! Both live for the process lifetime only; persistence, if any, is a
//! host concern.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tj_core::CriterionId;

use crate::alert::AlertKind;

/// Hours within which a repeated (criterion, kind) pair is suppressed.
pub const DEDUP_WINDOW_HOURS: i64 = 24;

// ── Alert history ────────────────────────────────────────────────────────────

/// One remembered emission.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Criterion that triggered the alert.
    pub criterion_id: CriterionId,
    /// Alert kind; (criterion, kind) is the dedup key.
    pub kind: AlertKind,
    /// Wall-clock emission time.
    pub emitted_at: NaiveDateTime,
}

/// Append-only log of recent emissions, scanned for dedup.
#[derive(Debug, Default)]
pub struct AlertHistory {
    entries: Vec<HistoryEntry>,
}

impl AlertHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emission.
    pub fn record(
        &mut self,
        criterion_id: CriterionId,
        kind: AlertKind,
        emitted_at: NaiveDateTime,
    ) {
        self.entries.push(HistoryEntry {
            criterion_id,
            kind,
            emitted_at,
        });
    }

    /// Return `true` if the same (criterion, kind) pair was emitted
    /// within the last [`DEDUP_WINDOW_HOURS`] before `now`.
    ///
    /// Wall-clock hours, not business hours.
    pub fn was_recently_emitted(
        &self,
        criterion_id: &str,
        kind: AlertKind,
        now: NaiveDateTime,
    ) -> bool {
        let window_start = now - Duration::hours(DEDUP_WINDOW_HOURS);
        self.entries.iter().any(|e| {
            e.criterion_id == criterion_id && e.kind == kind && e.emitted_at > window_start
        })
    }

    /// Drop entries older than twice the dedup window; they can no
    /// longer influence any suppression decision.
    pub fn prune(&mut self, now: NaiveDateTime) {
        let horizon = now - Duration::hours(2 * DEDUP_WINDOW_HOURS);
        self.entries.retain(|e| e.emitted_at > horizon);
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Daily counter ────────────────────────────────────────────────────────────

/// Alerts emitted "today", rolling automatically when the date changes.
///
/// The runtime's midnight task also resets it explicitly so the
/// rollover is logged at a predictable moment; the automatic roll makes
/// the cap correct even if that task is delayed or absent.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCounter {
    day: NaiveDate,
    count: u32,
}

impl Default for DailyCounter {
    fn default() -> Self {
        Self::new(NaiveDate::MIN)
    }
}

impl DailyCounter {
    /// A zeroed counter accumulating for `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            day: today,
            count: 0,
        }
    }

    /// Zero the count if `today` differs from the accumulating date.
    pub fn roll(&mut self, today: NaiveDate) {
        if self.day != today {
            self.day = today;
            self.count = 0;
        }
    }

    /// Record one emission.
    pub fn record(&mut self) {
        self.count += 1;
    }

    /// Zero the counter and start accumulating for `today`.
    pub fn reset(&mut self, today: NaiveDate) {
        self.day = today;
        self.count = 0;
    }

    /// Emissions recorded for the current day.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// The date the counter is accumulating for.
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    /// Return `true` once the day's budget is used up.
    pub fn is_exhausted(&self, max_per_day: u32) -> bool {
        self.count >= max_per_day
    }
}
