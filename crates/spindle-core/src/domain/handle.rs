//! JobHandle - claim 済みジョブの受け渡し用

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::ids::JobId;
use super::job::{JobName, JobRecord};

/// Identity of the scheduler (worker process) that owns claimed jobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerContext {
    name: String,
}

impl SchedulerContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A claimed job, bound to the scheduler that claimed it.
///
/// The record is the post-update document: `locked_at` is the claim time.
#[derive(Debug, Clone)]
pub struct JobHandle {
    record: JobRecord,
    scheduler: Arc<SchedulerContext>,
}

impl JobHandle {
    pub fn new(record: JobRecord, scheduler: Arc<SchedulerContext>) -> Self {
        Self { record, scheduler }
    }

    pub fn id(&self) -> JobId {
        self.record.id
    }

    pub fn name(&self) -> &JobName {
        &self.record.name
    }

    pub fn locked_at(&self) -> Option<DateTime<Utc>> {
        self.record.locked_at
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.record.data
    }

    pub fn record(&self) -> &JobRecord {
        &self.record
    }

    pub fn scheduler(&self) -> &SchedulerContext {
        &self.scheduler
    }

    pub fn into_record(self) -> JobRecord {
        self.record
    }
}
