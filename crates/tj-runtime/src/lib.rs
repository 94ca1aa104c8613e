//! Runtime wiring for the alert engine.
//!
//! This crate is the composition layer: it owns nothing domain-shaped
//! itself, it connects the evaluator, the calendar, and the mailer and
//! drives them. [`AlertService`] is the root object; hosts build one,
//! optionally attach a [`Mailer`](tj_mailer::Mailer), subscribe to the
//! [notification bus](bus), and spawn the [background tasks](tasks).
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tj_alerts::{default_rules, EvaluatorConfig};
//! use tj_calendar::JardimCalendar;
//! use tj_core::SystemClock;
//! use tj_runtime::{spawn_evaluation_loop, spawn_midnight_reset, AlertService};
//!
//! # async fn wire() {
//! let service = Arc::new(AlertService::new(
//!     EvaluatorConfig::default(),
//!     Arc::new(JardimCalendar::new()),
//!     Arc::new(SystemClock),
//! ));
//! let mut events = service.subscribe();
//!
//! let _eval = spawn_evaluation_loop(Arc::clone(&service), Vec::new, default_rules);
//! let _reset = spawn_midnight_reset(Arc::clone(&service));
//!
//! while let Ok(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// The broadcast notification bus and its event vocabulary.
pub mod bus;
/// The alert service composition root.
pub mod service;
/// Background tasks driving the service.
pub mod tasks;

// ── Convenience re-exports ───────────────────────────────────────────────────

pub use bus::{notification_bus, NotificationEvent, BUS_CAPACITY};
pub use service::{AlertService, BusDiagnosticsSink, EmailRecipient};
pub use tasks::{spawn_evaluation_loop, spawn_midnight_reset};
