//! Wall-clock injection.
//!
//! Every time-dependent computation in the workspace receives "now"
//! through a [`Clock`] rather than reading the system time directly.
//! The evaluator, the dedup window, and the midnight reset all operate
//! on **local naive time**: the dashboard's notion of "today" is the
//! municipality's, not UTC's.

use std::sync::Mutex;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// A source of the current local date-time.
pub trait Clock: std::fmt::Debug + Send + Sync {
    /// The current moment, local wall-clock, no timezone attached.
    fn now(&self) -> NaiveDateTime;

    /// The current calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Production clock backed by the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A settable clock for tests.
///
/// Holds a fixed moment that tests can move forward (or set outright)
/// to exercise dedup windows, day rollovers, and deadline arithmetic
/// deterministically.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Create a clock frozen at `moment`.
    pub fn new(moment: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(moment),
        }
    }

    /// Replace the current moment.
    pub fn set(&self, moment: NaiveDateTime) {
        *self.now.lock().expect("FixedClock mutex poisoned") = moment;
    }

    /// Move the clock forward (or backward, with a negative duration).
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("FixedClock mutex poisoned");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("FixedClock mutex poisoned")
    }
}
