use async_trait::async_trait;
use tokio::sync::broadcast;

use super::SessionEvent;
use crate::domain::error::DomainResult;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish_event(&self, event: SessionEvent) -> DomainResult<()>;
}

/// Fans session events out to every in-process subscriber.
#[derive(Debug, Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<SessionEvent>,
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastEventPublisher {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish_event(&self, event: SessionEvent) -> DomainResult<()> {
        // No subscribers is not an error.
        let _ = self.sender.send(event);
        Ok(())
    }
}
