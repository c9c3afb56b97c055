//! Domain model (ids, job record, definition, filter, sort, health, events, errors).

pub mod definition;
pub mod errors;
pub mod events;
pub mod filter;
pub mod handle;
pub mod health;
pub mod ids;
pub mod job;
pub mod sort;

pub use self::definition::JobDefinition;
pub use self::errors::{ClaimError, StoreError};
pub use self::events::SchedulerEvent;
pub use self::filter::{Filter, ReturnDocument, Update, UpdateOptions};
pub use self::handle::{JobHandle, SchedulerContext};
pub use self::health::{Connectivity, StoreHealth};
pub use self::ids::JobId;
pub use self::job::{JobName, JobRecord};
pub use self::sort::{Direction, SortField, SortKey, SortOrder};
