//! # tj-alerts
//!
//! The TranspJardim alert engine: criterion and rule model, message
//! templating, 24-hour dedup, the daily emission cap, and the
//! evaluation pass that turns (criteria, rules, now) into alerts.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Emitted alerts, `AlertKind`, `Priority`.
pub mod alert;

/// `EvaluatorConfig` with serde defaults.
pub mod config;

/// Tracked indicators ("critérios") and their periodicity.
pub mod criterion;

/// `AlertEvaluator` and the evaluation pass.
pub mod evaluator;

/// Cross-pass state: emission history and the daily counter.
pub mod history;

/// Alert rules, triggers, channels, and the default rule set.
pub mod rule;

/// Placeholder substitution for message templates.
pub mod template;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use alert::{Alert, AlertKind, Priority};
pub use config::EvaluatorConfig;
pub use criterion::{CompletionState, Criterion, Periodicity};
pub use evaluator::{days_until_due, AlertEvaluator, Emission};
pub use history::{AlertHistory, DailyCounter, HistoryEntry, DEDUP_WINDOW_HOURS};
pub use rule::{default_rules, AlertRule, ChannelSet, Trigger};
pub use template::render;
