//! Error types for the TranspJardim engine.
//!
//! The evaluation and calendar hot paths are deliberately infallible;
//! errors only surface from the edges that accept data from the host
//! application (rule and criterion validation, configuration, queue
//! handles). A single `thiserror`-derived enum covers all of them, with
//! the `ensure!` and `fail!` convenience macros for validators.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (maps to `fail!`).
    #[error("{0}")]
    Runtime(String),

    /// Host-supplied data failed validation (maps to `ensure!`).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Invalid evaluator or service configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The mail dispatch queue is unavailable (worker gone, channel
    /// closed).
    #[error("dispatch queue error: {0}")]
    Queue(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validate a precondition on host-supplied data.
///
/// Returns `Err(Error::Validation(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use tj_core::ensure;
/// fn positive(x: f64) -> tj_core::errors::Result<f64> {
///     ensure!(x > 0.0, "value must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Validation(
                format!($($msg)*)
            ));
        }
    };
}

/// Bail out with a runtime error.
///
/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use tj_core::fail;
/// fn always_err() -> tj_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
