//! Toast event sink trait and implementations.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::notifications::Severity;

/// User-visible toast emitted when a notification is delivered in real time.
///
/// The engine only produces these events; rendering belongs to the host
/// application's UI layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToastEvent {
    pub title: String,
    pub body: Option<String>,
    pub severity: Severity,
}

/// Trait for receiving toast events.
///
/// # Design Rules
///
/// - `emit()` must be fast and non-blocking (no network calls, no DB writes)
/// - Failure to emit must not affect notification persistence (best-effort)
pub trait ToastSink: Send + Sync {
    /// Emit a single toast event.
    fn emit(&self, event: ToastEvent);
}

/// No-op implementation for tests or contexts that don't surface toasts.
#[derive(Clone, Default)]
pub struct NoOpToastSink;

impl ToastSink for NoOpToastSink {
    fn emit(&self, _event: ToastEvent) {
        // Intentionally empty - events are discarded
    }
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockToastSink {
    events: Arc<Mutex<Vec<ToastEvent>>>,
}

impl MockToastSink {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<ToastEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clears collected events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl ToastSink for MockToastSink {
    fn emit(&self, event: ToastEvent) {
        self.events.lock().unwrap().push(event);
    }
}
