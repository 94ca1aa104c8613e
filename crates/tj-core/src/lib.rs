//! # tj-core
//!
//! Core types, error definitions, and injection seams shared across the
//! TranspJardim workspace crates: the error hierarchy, the `ensure!` /
//! `fail!` macros, the injectable [`Clock`], and the event-sink pattern.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Wall-clock injection: `Clock`, `SystemClock`, `FixedClock`.
pub mod clock;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Design patterns: event sink.
pub mod patterns;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// A percentage expressed on a 0–100 scale.
pub type Percent = f64;

/// Identifier of a tracked criterion, assigned by the host application.
pub type CriterionId = String;

/// Identifier of an alert rule, assigned by the host application.
pub type RuleId = String;

/// Identifier of a dashboard user, assigned by the host application.
pub type UserId = String;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{Error, Result};
pub use patterns::{EventSink, NullSink, RecordingSink};
