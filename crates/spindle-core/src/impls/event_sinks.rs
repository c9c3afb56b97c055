//! EventSink の実装

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::SchedulerEvent;
use crate::ports::EventSink;

/// Fan-out to every subscriber; events are dropped when nobody listens.
pub struct BroadcastEventSink {
    tx: broadcast::Sender<SchedulerEvent>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SchedulerEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl EventSink for BroadcastEventSink {
    async fn emit(&self, event: SchedulerEvent) {
        // send only fails when there are no receivers
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

#[async_trait]
impl EventSink for NoopEventSink {
    async fn emit(&self, _event: SchedulerEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn broadcast_reaches_every_subscriber() {
        let sink = BroadcastEventSink::default();
        let mut a = sink.subscribe();
        let mut b = sink.subscribe();

        sink.emit(SchedulerEvent::connection_lost("lost")).await;

        assert_eq!(a.try_recv().unwrap(), SchedulerEvent::connection_lost("lost"));
        assert_eq!(b.try_recv().unwrap(), SchedulerEvent::connection_lost("lost"));
        assert!(matches!(a.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn broadcast_without_subscribers_does_not_fail() {
        let sink = BroadcastEventSink::default();
        sink.emit(SchedulerEvent::connection_lost("nobody listening")).await;
    }
}
