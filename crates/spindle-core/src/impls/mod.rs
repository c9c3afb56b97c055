//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryJobStore**: テスト・デモ用のジョブテーブル
//! - **BroadcastEventSink** / **NoopEventSink**
//!
//! 本番用のストア実装（MongoDB, PostgreSQL）は別クレートに置く想定。

pub mod event_sinks;
pub mod inmem_store;

pub use self::event_sinks::{BroadcastEventSink, NoopEventSink};
pub use self::inmem_store::InMemoryJobStore;
