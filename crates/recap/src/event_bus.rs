//! Local event bus for embedding the pipeline in a desktop shell.

use log::debug;
use recap_protocol::{EventMsg, EventSink};
use tokio::sync::broadcast;

/// Broadcast-backed event bus for pipeline notices.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<EventMsg>,
}

impl EventBus {
    /// Create a new event bus with the given channel buffer size.
    pub fn new(buffer: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer);
        debug!("event bus initialized (buffer={})", buffer);
        Self { sender }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<EventMsg> {
        self.sender.subscribe()
    }
}

impl EventSink for EventBus {
    /// Emit an event into the broadcast channel.
    fn emit(&self, event: EventMsg) {
        let _ = self.sender.send(event);
    }
}
