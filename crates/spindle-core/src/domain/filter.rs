//! Eligibility predicates and the lock mutation handed to the store.
//!
//! `Filter` はストアに渡す「どのレコードが対象か」の条件。
//! document store ならクエリに、SQL なら WHERE 句に翻訳される想定で、
//! InMemoryJobStore は `Filter::matches` をそのまま使う。

use chrono::{DateTime, Utc};

use super::job::{JobName, JobRecord};
use super::sort::SortOrder;

/// Record predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `name = name AND locked_at IS NULL AND next_run_at <= scan_horizon AND disabled != true`
    DueBySchedule {
        name: JobName,
        scan_horizon: DateTime<Utc>,
    },

    /// `name = name AND locked_at <= lock_deadline AND disabled != true`
    AbandonedLock {
        name: JobName,
        lock_deadline: DateTime<Utc>,
    },

    /// Logical OR.
    Any(Vec<Filter>),
}

impl Filter {
    pub fn due_by_schedule(name: JobName, scan_horizon: DateTime<Utc>) -> Self {
        Self::DueBySchedule { name, scan_horizon }
    }

    pub fn abandoned_lock(name: JobName, lock_deadline: DateTime<Utc>) -> Self {
        Self::AbandonedLock {
            name,
            lock_deadline,
        }
    }

    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::Any(filters.into_iter().collect())
    }

    /// Both boundaries are inclusive.
    pub fn matches(&self, record: &JobRecord) -> bool {
        match self {
            Filter::DueBySchedule { name, scan_horizon } => {
                record.name == *name
                    && !record.disabled
                    && record.locked_at.is_none()
                    && record.next_run_at.is_some_and(|at| at <= *scan_horizon)
            }
            Filter::AbandonedLock {
                name,
                lock_deadline,
            } => {
                record.name == *name
                    && !record.disabled
                    && record.locked_at.is_some_and(|at| at <= *lock_deadline)
            }
            Filter::Any(filters) => filters.iter().any(|f| f.matches(record)),
        }
    }
}

/// Mutation applied to the matched record.
///
/// Claimer が書き込むのは `locked_at` だけなので、バリアントも 1 つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    Lock { at: DateTime<Utc> },
}

impl Update {
    pub fn lock(at: DateTime<Utc>) -> Self {
        Self::Lock { at }
    }

    pub fn apply(&self, record: &mut JobRecord) {
        match self {
            Update::Lock { at } => record.locked_at = Some(*at),
        }
    }
}

/// Which version of the record the store hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnDocument {
    Before,
    #[default]
    After,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateOptions {
    pub sort: SortOrder,
    pub return_document: ReturnDocument,
}

impl UpdateOptions {
    pub fn new(sort: SortOrder) -> Self {
        Self {
            sort,
            return_document: ReturnDocument::After,
        }
    }

    pub fn return_document(mut self, return_document: ReturnDocument) -> Self {
        self.return_document = return_document;
        self
    }
}
