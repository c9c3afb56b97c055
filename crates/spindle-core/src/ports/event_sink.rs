//! EventSink port - ホストへのイベント通知
//!
//! # 実装
//! - `BroadcastEventSink`: tokio broadcast でホストが購読する
//! - `NoopEventSink`: 何もしない

use async_trait::async_trait;

use crate::domain::SchedulerEvent;

/// Delivery is best-effort; emitting never fails the caller.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: SchedulerEvent);
}
