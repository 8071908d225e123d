//! Event sink that buffers emitted events for assertions.

use parking_lot::Mutex;
use recap_protocol::{EventMsg, EventPayload, EventSink};
use std::sync::Arc;

/// `EventSink` that collects every emitted event.
#[derive(Clone, Default)]
pub struct CollectingSink {
    events: Arc<Mutex<Vec<EventMsg>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected events in emission order.
    pub fn events(&self) -> Vec<EventMsg> {
        self.events.lock().clone()
    }

    /// Payloads of the collected events in emission order.
    pub fn payloads(&self) -> Vec<EventPayload> {
        self.events.lock().iter().map(|e| e.payload.clone()).collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: EventMsg) {
        self.events.lock().push(event);
    }
}
