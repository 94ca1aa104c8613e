//! # tj-mailer
//!
//! Outbound email for TranspJardim: the provider-facing request
//! contract, structured transport errors, outcome classification, and
//! the single-worker dispatch queue with minimum inter-request spacing.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Structured transport errors.
pub mod error;

/// The outbound email request contract.
pub mod message;

/// Dispatch outcomes for observers.
pub mod outcome;

/// The dispatch queue, worker, and transport seam.
pub mod queue;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use error::{TransportError, TransportErrorCode};
pub use message::{subject_for, AlertType, CriterionRef, EmailRequest, UserRef};
pub use outcome::{DispatchOutcome, DispatchStatus};
pub use queue::{EmailTransport, Mailer, MailerConfig};
