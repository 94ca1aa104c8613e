//! # transpjardim
//!
//! Business-day calendar and compliance alert engine for the
//! TranspJardim municipal transparency dashboard of Jardim/MS.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `tj-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! transpjardim = "0.1"
//! ```
//!
//! ```rust
//! use chrono::NaiveDate;
//! use transpjardim::calendar::{BusinessCalendar, JardimCalendar};
//!
//! let cal = JardimCalendar::new();
//! let independence_day = NaiveDate::from_ymd_opt(2024, 9, 7).unwrap();
//! assert!(cal.is_holiday(independence_day));
//! assert!(!cal.is_working_day(independence_day));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, error definitions, and injection seams.
pub use tj_core as core;

/// The Brazilian business-day calendar for Jardim/MS.
pub use tj_calendar as calendar;

/// Criteria, alert rules, and the evaluation pass.
pub use tj_alerts as alerts;

/// The rate-limited email dispatch queue.
pub use tj_mailer as mailer;

/// Runtime wiring: alert service, notification bus, background tasks.
pub use tj_runtime as runtime;
