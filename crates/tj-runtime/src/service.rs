//! The alert service: explicit composition root for the alert engine.
//!
//! One [`AlertService`] owns the evaluator (under a lock), the
//! notification bus, the injected clock, and optionally a mailer
//! binding. The periodic loop, the midnight reset, and manual triggers
//! all go through the same [`check_now`](AlertService::check_now)
//! path, so there is exactly one place where emissions fan out to the
//! bus and the email queue.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use tj_alerts::{
    Alert, AlertEvaluator, AlertKind, AlertRule, Criterion, Emission, EvaluatorConfig, Priority,
};
use tj_calendar::BusinessCalendar;
use tj_core::{Clock, EventSink, NullSink};
use tj_mailer::{
    AlertType, CriterionRef, DispatchOutcome, DispatchStatus, EmailRequest, Mailer, UserRef,
};

use crate::bus::{notification_bus, NotificationEvent};

// ── Recipient ────────────────────────────────────────────────────────────────

/// Where alert emails go.
///
/// The dashboard sends all alert emails to a single administrative
/// recipient; per-user routing is a host concern.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmailRecipient {
    /// Destination address.
    pub address: String,
    /// Recipient user id, echoed in the payload.
    pub user_id: String,
    /// Recipient display name, echoed in the payload.
    pub user_name: String,
}

#[derive(Debug)]
struct MailerBinding {
    mailer: Mailer,
    recipient: EmailRecipient,
}

// ── Service ──────────────────────────────────────────────────────────────────

/// Composition root owning evaluator state, the notification bus, and
/// the optional mailer binding.
///
/// Evaluation passes are synchronous and short; the evaluator mutex is
/// never held across an await point.
#[derive(Debug)]
pub struct AlertService {
    config: EvaluatorConfig,
    evaluator: Mutex<AlertEvaluator>,
    clock: Arc<dyn Clock>,
    bus: broadcast::Sender<NotificationEvent>,
    mailer: Option<MailerBinding>,
}

impl AlertService {
    /// Build a service with no mailer attached.
    pub fn new(
        config: EvaluatorConfig,
        calendar: Arc<dyn BusinessCalendar>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let evaluator = AlertEvaluator::new(config.clone(), calendar);
        Self {
            config,
            evaluator: Mutex::new(evaluator),
            clock,
            bus: notification_bus(),
            mailer: None,
        }
    }

    /// Attach a mailer and the recipient alert emails go to.
    pub fn with_mailer(mut self, mailer: Mailer, recipient: EmailRecipient) -> Self {
        self.mailer = Some(MailerBinding { mailer, recipient });
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// The injected clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Subscribe to the notification bus.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.bus.subscribe()
    }

    /// The sink hosts should hand to [`Mailer::spawn`]: forwards
    /// dispatch outcomes to the bus when the debug flag is on,
    /// otherwise discards them.
    pub fn diagnostics_sink(&self) -> Arc<dyn EventSink<DispatchOutcome>> {
        if self.config.debug {
            Arc::new(BusDiagnosticsSink::new(self.bus.clone()))
        } else {
            Arc::new(NullSink)
        }
    }

    /// Alerts emitted so far today.
    pub fn alerts_today(&self) -> u32 {
        self.evaluator
            .lock()
            .expect("evaluator mutex poisoned")
            .alerts_today()
    }

    /// Return `true` if an attached mailer reports itself configured.
    pub fn is_mailer_configured(&self) -> bool {
        self.mailer
            .as_ref()
            .is_some_and(|b| b.mailer.is_configured())
    }

    /// Run one evaluation pass now and fan the emissions out.
    ///
    /// This is both the manual trigger and the body of the periodic
    /// loop. Every emission goes to the bus; "alta"-priority ones also
    /// produce a toast; rules with the email channel on are forwarded
    /// to the mailer when one is attached and configured.
    pub fn check_now(&self, criteria: &[Criterion], rules: &[AlertRule]) -> Vec<Emission> {
        let now = self.clock.now();
        let emissions = self
            .evaluator
            .lock()
            .expect("evaluator mutex poisoned")
            .run_pass(criteria, rules, now);

        for emission in &emissions {
            let _ = self.bus.send(NotificationEvent::AlertEmitted {
                alert: emission.alert.clone(),
            });
            if emission.alert.priority == Priority::High {
                let _ = self.bus.send(NotificationEvent::Toast {
                    criterion_id: emission.alert.criterion_id.clone(),
                    message: emission.alert.message.clone(),
                });
            }
            self.forward_email(emission, criteria);
        }
        emissions
    }

    /// Zero the daily counter for the clock's current date.
    pub fn reset_daily_counter(&self) {
        let today = self.clock.today();
        self.evaluator
            .lock()
            .expect("evaluator mutex poisoned")
            .reset_daily_counter(today);
    }

    /// Queue an alert email if the emission wants one and a configured
    /// mailer is attached. An unconfigured or absent mailer is a
    /// silent no-op.
    fn forward_email(&self, emission: &Emission, criteria: &[Criterion]) {
        if !emission.channels.email {
            return;
        }
        let Some(binding) = &self.mailer else {
            return;
        };
        if !binding.mailer.is_configured() {
            debug!(
                criterion = %emission.alert.criterion_id,
                "mailer not configured; alert email skipped"
            );
            return;
        }
        let Some(criterion) = criteria
            .iter()
            .find(|c| c.id == emission.alert.criterion_id)
        else {
            return;
        };

        let request = EmailRequest::new(
            binding.recipient.address.clone(),
            alert_type_for(&emission.alert),
            CriterionRef {
                id: criterion.id.clone(),
                nome: criterion.name.clone(),
                secretaria: criterion.department.clone(),
            },
            UserRef {
                id: binding.recipient.user_id.clone(),
                name: binding.recipient.user_name.clone(),
            },
            matches!(emission.alert.kind, AlertKind::DueDate)
                .then(|| criterion.due_date.format("%d/%m/%Y").to_string()),
        );
        if let Err(e) = binding.mailer.enqueue(request) {
            warn!(error = %e, "failed to queue alert email");
        }
    }
}

/// Map alert priority onto the email urgency class.
fn alert_type_for(alert: &Alert) -> AlertType {
    if alert.priority == Priority::High {
        AlertType::Urgent
    } else {
        AlertType::Warning
    }
}

// ── Diagnostics sink ─────────────────────────────────────────────────────────

/// Forwards dispatch outcomes onto the notification bus as
/// [`NotificationEvent::MailerDiagnostic`] events.
#[derive(Debug, Clone)]
pub struct BusDiagnosticsSink {
    bus: broadcast::Sender<NotificationEvent>,
}

impl BusDiagnosticsSink {
    /// Wrap a bus sender.
    pub fn new(bus: broadcast::Sender<NotificationEvent>) -> Self {
        Self { bus }
    }
}

impl EventSink<DispatchOutcome> for BusDiagnosticsSink {
    fn publish(&self, outcome: &DispatchOutcome) {
        let detail = match &outcome.status {
            DispatchStatus::Delivered => "entregue".to_string(),
            DispatchStatus::TestModeRestricted => "provedor em modo de teste".to_string(),
            DispatchStatus::RateLimited => "limite de envio atingido".to_string(),
            DispatchStatus::Failed { code, message } => format!("falha ({code:?}): {message}"),
        };
        let _ = self.bus.send(NotificationEvent::MailerDiagnostic {
            to: outcome.request.to.clone(),
            detail,
        });
    }
}
