//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」。Claimer はここの trait だけに依存し、
//! 具体的なストア（MongoDB, PostgreSQL など）は知らない。

pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod job_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::job_store::JobStore;
