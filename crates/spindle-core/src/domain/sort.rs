//! Sort order: which eligible record wins when several match.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::job::JobRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    NextRunAt,
    Priority,
    LockedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub direction: Direction,
}

impl SortKey {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }
}

/// Ordered list of sort keys.
///
/// # 決定性
/// キーが全部同じでも `JobId` 昇順で必ず順位が決まる（全順序）。
/// 同じテーブル・同じ設定なら何度呼んでも同じレコードが選ばれる。
///
/// `None` のタイムスタンプは `Some` より前に並ぶ（document store の null と同じ扱い）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    keys: Vec<SortKey>,
}

impl SortOrder {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn compare(&self, a: &JobRecord, b: &JobRecord) -> Ordering {
        self.keys
            .iter()
            .map(|key| {
                let ord = match key.field {
                    SortField::NextRunAt => a.next_run_at.cmp(&b.next_run_at),
                    SortField::Priority => a.priority.cmp(&b.priority),
                    SortField::LockedAt => a.locked_at.cmp(&b.locked_at),
                };
                match key.direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}

impl Default for SortOrder {
    /// Earliest `next_run_at` first, then highest priority.
    fn default() -> Self {
        Self::new(vec![
            SortKey::asc(SortField::NextRunAt),
            SortKey::desc(SortField::Priority),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::JobId;
    use chrono::{TimeDelta, TimeZone, Utc};
    use ulid::Ulid;

    fn id(n: u64) -> JobId {
        JobId::from_ulid(Ulid::from_parts(n, 0))
    }

    #[test]
    fn default_prefers_earliest_next_run_at() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let early = JobRecord::new(id(2), "a", t - TimeDelta::seconds(10));
        let late = JobRecord::new(id(1), "a", t).with_priority(100);

        assert_eq!(SortOrder::default().compare(&early, &late), Ordering::Less);
    }

    #[test]
    fn default_breaks_time_ties_by_higher_priority() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let low = JobRecord::new(id(1), "a", t).with_priority(0);
        let high = JobRecord::new(id(2), "a", t).with_priority(10);

        assert_eq!(SortOrder::default().compare(&high, &low), Ordering::Less);
    }

    #[test]
    fn full_ties_fall_back_to_id() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let first = JobRecord::new(id(1), "a", t);
        let second = JobRecord::new(id(2), "a", t);

        let order = SortOrder::default();
        assert_eq!(order.compare(&first, &second), Ordering::Less);
        assert_eq!(order.compare(&second, &first), Ordering::Greater);

        let empty = SortOrder::new(vec![]);
        assert_eq!(empty.compare(&first, &second), Ordering::Less);
    }

    #[test]
    fn missing_timestamp_sorts_first_ascending() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let unlocked = JobRecord::new(id(2), "a", t);
        let locked = JobRecord::new(id(1), "a", t).with_locked_at(t);

        let order = SortOrder::new(vec![SortKey::asc(SortField::LockedAt)]);
        assert_eq!(order.compare(&unlocked, &locked), Ordering::Less);
    }
}
