//! Store connectivity health.

/// What the store reports about its connection before a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHealth {
    pub connected: bool,
    pub reconnectable: bool,
    pub destroyed: bool,
}

/// How the Claimer should react to the current health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Healthy,
    /// No live connection, but the client will reconnect on its own.
    Recoverable,
    /// No live connection and no way back; the host must restart.
    Unrecoverable,
}

impl StoreHealth {
    pub fn healthy() -> Self {
        Self {
            connected: true,
            reconnectable: true,
            destroyed: false,
        }
    }

    /// Build health from raw driver introspection.
    ///
    /// `active_connections = None` は接続数を公開しない pooled / unified
    /// topology を表し、接続ありとみなす。
    pub fn from_topology(
        active_connections: Option<usize>,
        auto_reconnect: bool,
        destroyed: bool,
    ) -> Self {
        Self {
            connected: active_connections.is_none_or(|n| n > 0),
            reconnectable: auto_reconnect,
            destroyed,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        if self.connected {
            Connectivity::Healthy
        } else if self.reconnectable && !self.destroyed {
            Connectivity::Recoverable
        } else {
            Connectivity::Unrecoverable
        }
    }
}
