//! # tj-calendar
//!
//! Working-day calendar for the TranspJardim engine: holiday
//! classification (fixed national/regional/municipal dates and
//! Easter-derived feasts), next/previous working-day navigation,
//! working-day counting, business-hours rules, and yearly holiday
//! enumeration.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `BusinessCalendar` trait and generic implementations.
pub mod calendar;

/// Easter computation and movable-feast offsets.
pub mod easter;

/// Holiday records and categories.
pub mod holiday;

/// The Jardim (MS) municipal calendar.
pub mod jardim;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{
    AlwaysOpen, BusinessCalendar, WeekendsOnly, BUSINESS_HOURS_END, BUSINESS_HOURS_START,
};
pub use easter::{carnival, corpus_christi, easter_sunday, good_friday};
pub use holiday::{FixedHoliday, Holiday, HolidayCategory};
pub use jardim::JardimCalendar;
