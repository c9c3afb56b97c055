//! Job record: the persisted document a worker claims.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::JobId;

/// Job-type identifier. Many records share the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(String);

impl JobName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for JobName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JobName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One row of the shared job table.
///
/// Claimer が見るのは `name` / `next_run_at` / `locked_at` / `disabled` だけ。
/// 残りのフィールドは実行側・スケジューリング側の持ち物で、ここでは運ぶだけ。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(rename = "_id")]
    pub id: JobId,

    pub name: JobName,

    /// When the job becomes eligible to run.
    #[serde(default)]
    pub next_run_at: Option<DateTime<Utc>>,

    /// `None` = unclaimed, `Some(t)` = claimed starting at `t`.
    #[serde(default)]
    pub locked_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub disabled: bool,

    /// Higher runs first when `next_run_at` ties.
    #[serde(default)]
    pub priority: i32,

    #[serde(default)]
    pub data: serde_json::Value,

    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_finished_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub fail_count: u32,

    #[serde(default)]
    pub fail_reason: Option<String>,
}

impl JobRecord {
    /// An unlocked, enabled record due at `next_run_at`.
    pub fn new(id: JobId, name: impl Into<JobName>, next_run_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            next_run_at: Some(next_run_at),
            locked_at: None,
            disabled: false,
            priority: 0,
            data: serde_json::Value::Null,
            last_run_at: None,
            last_finished_at: None,
            fail_count: 0,
            fail_reason: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_locked_at(mut self, at: DateTime<Utc>) -> Self {
        self.locked_at = Some(at);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn is_locked(&self) -> bool {
        self.locked_at.is_some()
    }
}
