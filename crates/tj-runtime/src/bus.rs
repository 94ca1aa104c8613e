//! The notification bus.
//!
//! A `tokio::broadcast` channel carrying everything UI consumers need:
//! new alerts for the panel, toasts for urgent ones, and mailer
//! diagnostics when debugging. Slow or absent receivers never block
//! the sender; missed messages are simply dropped by the channel.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use tj_alerts::Alert;
use tj_core::CriterionId;

/// Capacity of the notification bus.
pub const BUS_CAPACITY: usize = 1024;

/// Messages broadcast to UI consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A new alert was emitted; destined for the dashboard panel.
    AlertEmitted {
        /// The alert, fully rendered.
        alert: Alert,
    },
    /// An "alta"-priority alert that should interrupt the user now.
    Toast {
        /// The criterion the toast is about.
        criterion_id: CriterionId,
        /// Message to display.
        message: String,
    },
    /// An email dispatch outcome, forwarded only when the evaluator's
    /// debug flag is on.
    MailerDiagnostic {
        /// Recipient of the attempted email.
        to: String,
        /// Human-readable outcome description.
        detail: String,
    },
}

/// Create the notification bus sender.
///
/// Receivers come from [`broadcast::Sender::subscribe`]; the initial
/// receiver is dropped here, so sends before the first subscription
/// are quietly discarded.
pub fn notification_bus() -> broadcast::Sender<NotificationEvent> {
    let (tx, _rx) = broadcast::channel(BUS_CAPACITY);
    tx
}
