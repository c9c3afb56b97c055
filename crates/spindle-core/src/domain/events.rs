//! Events - ホストアプリケーションへの通知
//!
//! EventSink 経由で外に出る。致命的でない異常（接続断など）はエラーにせず、
//! イベントとして知らせてポーリングを続ける。

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchedulerEvent {
    /// Store connection is gone but the client will reconnect.
    ConnectionLost { message: String },
}

impl SchedulerEvent {
    pub fn connection_lost(message: impl Into<String>) -> Self {
        Self::ConnectionLost {
            message: message.into(),
        }
    }

    /// Error-class events are the ones a host usually wires to alerting.
    pub fn is_error(&self) -> bool {
        match self {
            SchedulerEvent::ConnectionLost { .. } => true,
        }
    }
}

impl fmt::Display for SchedulerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerEvent::ConnectionLost { message } => write!(f, "error: {message}"),
        }
    }
}
