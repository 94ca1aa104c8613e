//! Event-sink pattern.
//!
//! Side effects that must not influence the computation that caused
//! them (diagnostic reports, dispatch outcomes) are pushed into an
//! [`EventSink`] owned by the composition root. Components receive the
//! sink by reference at construction time; there is no global observer
//! registry, so tests can assert on published events deterministically.

use std::sync::Mutex;

/// A consumer of fire-and-forget events of type `E`.
///
/// Implementations must tolerate being called from any thread and must
/// not block for long: publishers treat `publish` as cheap.
pub trait EventSink<E>: Send + Sync {
    /// Deliver one event. Errors are the sink's own problem; publishers
    /// never observe them.
    fn publish(&self, event: &E);
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl<E> EventSink<E> for NullSink {
    fn publish(&self, _event: &E) {}
}

/// A sink that records every event, for tests.
#[derive(Debug, Default)]
pub struct RecordingSink<E> {
    events: Mutex<Vec<E>>,
}

impl<E: Clone> RecordingSink<E> {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of everything published so far.
    pub fn events(&self) -> Vec<E> {
        self.events
            .lock()
            .expect("RecordingSink mutex poisoned")
            .clone()
    }

    /// Drain and return all recorded events.
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock().expect("RecordingSink mutex poisoned"))
    }

    /// Number of events recorded so far.
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .expect("RecordingSink mutex poisoned")
            .len()
    }

    /// Whether nothing has been published yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Clone + Send> EventSink<E> for RecordingSink<E> {
    fn publish(&self, event: &E) {
        self.events
            .lock()
            .expect("RecordingSink mutex poisoned")
            .push(event.clone());
    }
}
