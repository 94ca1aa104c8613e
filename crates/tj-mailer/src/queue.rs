//! The rate-limited dispatch queue.
//!
//! Requests enter an unbounded FIFO and a single worker drains it, one
//! request in flight at a time, waiting [`MailerConfig::min_spacing`]
//! between attempts as a courtesy to the provider. Every attempt
//! produces a [`DispatchOutcome`] on the injected sink; nothing is
//! retried, and no outcome ever propagates back to the alert that
//! queued the email.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tj_core::{Error, EventSink, Result};

use crate::error::TransportError;
use crate::message::EmailRequest;
use crate::outcome::{DispatchOutcome, DispatchStatus};

// ── Transport seam ───────────────────────────────────────────────────────────

/// A provider integration that can send one email.
///
/// The concrete provider lives in the host application; this crate
/// only defines the seam the queue drives.
#[async_trait]
pub trait EmailTransport: Send + Sync + 'static {
    /// Attempt to deliver `request`.
    async fn send(&self, request: &EmailRequest) -> Result<(), TransportError>;

    /// Return `true` if the provider credentials are present.
    ///
    /// This is the initial configured state; a successful (or
    /// test-mode-restricted) send later latches the mailer configured
    /// regardless.
    fn is_configured(&self) -> bool;
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Queue tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    /// Minimum milliseconds between consecutive send attempts.
    pub min_spacing_ms: u64,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self { min_spacing_ms: 600 }
    }
}

impl MailerConfig {
    /// The spacing as a [`Duration`].
    pub fn min_spacing(&self) -> Duration {
        Duration::from_millis(self.min_spacing_ms)
    }
}

// ── Mailer handle ────────────────────────────────────────────────────────────

/// Handle to the dispatch queue.
///
/// Cheap to clone. When the last handle is dropped the channel closes;
/// the worker drains the remaining requests and exits.
#[derive(Debug, Clone)]
pub struct Mailer {
    tx: mpsc::UnboundedSender<EmailRequest>,
    configured: Arc<AtomicBool>,
}

impl Mailer {
    /// Spawn the dispatch worker and return its handle.
    ///
    /// `sink` observes every attempt's outcome. The returned
    /// [`JoinHandle`] lets hosts await worker shutdown on teardown;
    /// dropping it detaches the worker, which is the normal mode.
    pub fn spawn<T: EmailTransport>(
        transport: T,
        config: MailerConfig,
        sink: Arc<dyn EventSink<DispatchOutcome>>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let configured = Arc::new(AtomicBool::new(transport.is_configured()));
        let worker = tokio::spawn(dispatch_loop(
            transport,
            config,
            rx,
            Arc::clone(&configured),
            sink,
        ));
        (Self { tx, configured }, worker)
    }

    /// Queue an email for delivery.
    ///
    /// Returns [`Error::Queue`] if the worker is gone.
    pub fn enqueue(&self, request: EmailRequest) -> Result<()> {
        self.tx
            .send(request)
            .map_err(|_| Error::Queue("email dispatch worker is gone".into()))
    }

    /// Return `true` once the provider is known to accept our sends,
    /// either from credentials present at startup or from a delivery
    /// confirmed since.
    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Relaxed)
    }
}

// ── Worker ───────────────────────────────────────────────────────────────────

async fn dispatch_loop<T: EmailTransport>(
    transport: T,
    config: MailerConfig,
    mut rx: mpsc::UnboundedReceiver<EmailRequest>,
    configured: Arc<AtomicBool>,
    sink: Arc<dyn EventSink<DispatchOutcome>>,
) {
    let spacing = config.min_spacing();
    info!(spacing_ms = config.min_spacing_ms, "email dispatch worker started");
    while let Some(request) = rx.recv().await {
        let result = transport.send(&request).await;
        let outcome = DispatchOutcome::classify(request, result);
        match &outcome.status {
            DispatchStatus::Delivered => {
                debug!(to = %outcome.request.to, "email delivered");
            }
            DispatchStatus::TestModeRestricted => {
                warn!(to = %outcome.request.to, "provider in test mode; recipient restricted");
            }
            DispatchStatus::RateLimited => {
                warn!(to = %outcome.request.to, "provider rate limit hit");
            }
            DispatchStatus::Failed { code, message } => {
                warn!(
                    to = %outcome.request.to,
                    code = ?code,
                    detail = %message,
                    "email dispatch failed"
                );
            }
        }
        if outcome.confirms_configured() {
            configured.store(true, Ordering::Relaxed);
        }
        sink.publish(&outcome);
        tokio::time::sleep(spacing).await;
    }
    debug!("email dispatch worker drained and stopped");
}
