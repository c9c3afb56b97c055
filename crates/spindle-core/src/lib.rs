//! spindle-core
//!
//! 分散ジョブキューのワーカーが、共有ジョブテーブルから次のジョブを
//! コーディネータなしで atomic に claim するためのコア。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, job, definition, filter, sort, health, handle, events, errors）
//! - **ports**: 抽象化レイヤー（JobStore, Clock, EventSink, IdGenerator）
//! - **impls**: 実装（InMemoryJobStore, BroadcastEventSink など開発用）
//! - **app**: Claimer と ClaimConfig

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{ClaimConfig, ClaimStrategy, Claimer};
pub use domain::{ClaimError, JobDefinition, JobHandle, JobName, JobRecord, SchedulerContext};
