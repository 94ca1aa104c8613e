//! Dispatch outcomes published to the observer sink.

use crate::error::{TransportError, TransportErrorCode};
use crate::message::EmailRequest;

/// How one dispatch attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchStatus {
    /// The provider accepted the message.
    Delivered,
    /// The provider is in test mode and refused the recipient; the
    /// credentials themselves work.
    TestModeRestricted,
    /// The provider throttled us. Transient; the request is not
    /// retried, the next one simply waits its turn.
    RateLimited,
    /// Any other failure.
    Failed {
        /// Structured failure class.
        code: TransportErrorCode,
        /// Provider-supplied detail.
        message: String,
    },
}

/// Terminal result of one dispatch attempt, as seen by observers.
///
/// Outcomes are diagnostic only: they never retract the alert that
/// produced the email, and the queue never retries.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// The request the attempt was for.
    pub request: EmailRequest,
    /// How it ended.
    pub status: DispatchStatus,
}

impl DispatchOutcome {
    /// Classify a transport result.
    pub fn classify(request: EmailRequest, result: Result<(), TransportError>) -> Self {
        let status = match result {
            Ok(()) => DispatchStatus::Delivered,
            Err(e) => match e.code {
                TransportErrorCode::TestModeRestricted => DispatchStatus::TestModeRestricted,
                TransportErrorCode::RateLimited => DispatchStatus::RateLimited,
                TransportErrorCode::Unauthorized | TransportErrorCode::Unknown => {
                    DispatchStatus::Failed {
                        code: e.code,
                        message: e.message,
                    }
                }
            },
        };
        Self { request, status }
    }

    /// Return `true` when the attempt proves the provider accepts our
    /// requests (delivered, or refused only by test-mode restrictions).
    pub fn confirms_configured(&self) -> bool {
        matches!(
            self.status,
            DispatchStatus::Delivered | DispatchStatus::TestModeRestricted
        )
    }
}
