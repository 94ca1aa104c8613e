//! Cross-cutting design patterns shared by the workspace crates.

/// Event-sink (observer) pattern for fire-and-forget reporting.
pub mod sink;

pub use sink::{EventSink, NullSink, RecordingSink};
