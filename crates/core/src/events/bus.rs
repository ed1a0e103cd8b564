use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::StudioEvent;

/// In-process event bus backed by `tokio::broadcast`.
///
/// Publishing is fire-and-forget: the editor never fails because nobody is
/// listening, and a slow subscriber only loses its own backlog.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<StudioEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers, if any.
    pub fn publish(&self, event: StudioEvent) {
        let _ = self.sender.send(event);
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
