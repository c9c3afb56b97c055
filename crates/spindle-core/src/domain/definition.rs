//! Job-type definition: lock lifetime and concurrency policy.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Default lock lifetime (10 minutes).
pub const DEFAULT_LOCK_LIFETIME: Duration = Duration::from_secs(10 * 60);

/// Default number of jobs of one type a worker runs at once.
pub const DEFAULT_CONCURRENCY: u32 = 5;

/// Per job-type settings, registered by the host application.
///
/// Claimer が読むのは `lock_lifetime` だけ。`concurrency` / `lock_limit` /
/// `priority` はポーリングループ側が使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDefinition {
    /// A lock older than this is abandoned and may be reclaimed by any worker.
    pub lock_lifetime: Duration,

    /// Max jobs of this type running at once in one worker.
    pub concurrency: u32,

    /// Max jobs of this type locked at once in one worker (0 = unlimited).
    pub lock_limit: u32,

    pub priority: i32,
}

impl JobDefinition {
    pub fn new(lock_lifetime: Duration) -> Self {
        Self {
            lock_lifetime,
            ..Self::default()
        }
    }

    pub fn with_concurrency(mut self, concurrency: u32) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_lock_limit(mut self, lock_limit: u32) -> Self {
        self.lock_limit = lock_limit;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// `now - lock_lifetime`.
    ///
    /// A lifetime too large for `TimeDelta` saturates to the earliest
    /// representable instant, so no lock is ever treated as abandoned.
    pub fn lock_deadline(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::from_std(self.lock_lifetime)
            .ok()
            .and_then(|lifetime| now.checked_sub_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for JobDefinition {
    fn default() -> Self {
        Self {
            lock_lifetime: DEFAULT_LOCK_LIFETIME,
            concurrency: DEFAULT_CONCURRENCY,
            lock_limit: 0,
            priority: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults() {
        let def = JobDefinition::default();
        assert_eq!(def.lock_lifetime, Duration::from_secs(600));
        assert_eq!(def.concurrency, 5);
        assert_eq!(def.lock_limit, 0);
        assert_eq!(def.priority, 0);
    }

    #[test]
    fn lock_deadline_subtracts_lifetime() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let def = JobDefinition::new(Duration::from_secs(5 * 60));
        assert_eq!(
            def.lock_deadline(now),
            Utc.with_ymd_and_hms(2024, 1, 1, 11, 55, 0).unwrap()
        );
    }

    #[test]
    fn zero_lifetime_deadline_is_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let def = JobDefinition::new(Duration::ZERO);
        assert_eq!(def.lock_deadline(now), now);
    }

    #[test]
    fn huge_lifetime_saturates() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let def = JobDefinition::new(Duration::MAX);
        assert_eq!(def.lock_deadline(now), DateTime::<Utc>::MIN_UTC);
    }
}
