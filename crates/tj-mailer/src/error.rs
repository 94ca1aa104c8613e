//! Structured transport errors.
//!
//! Providers report failures with a machine-readable code instead of a
//! free-text message the caller would have to sniff. The code decides
//! how the dispatch queue classifies the attempt; the message is for
//! logs only.

use thiserror::Error;

/// Classified reason a send attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorCode {
    /// The provider is in sandbox/test mode and refused the recipient.
    /// Proves the credentials work; the mailer counts it as configured.
    TestModeRestricted,
    /// The provider throttled the request. Transient.
    RateLimited,
    /// Credentials missing or rejected.
    Unauthorized,
    /// Anything else.
    Unknown,
}

/// Error returned by an [`EmailTransport`](crate::EmailTransport) send.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("email transport error ({code:?}): {message}")]
pub struct TransportError {
    /// Structured failure class.
    pub code: TransportErrorCode,
    /// Provider-supplied detail, for logs.
    pub message: String,
}

impl TransportError {
    /// Build an error from a code and log detail.
    pub fn new(code: TransportErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_detail() {
        let e = TransportError::new(TransportErrorCode::RateLimited, "429 from provider");
        assert_eq!(
            e.to_string(),
            "email transport error (RateLimited): 429 from provider"
        );
    }
}
