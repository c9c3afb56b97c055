//! InMemoryJobStore - 開発用・テスト用のジョブテーブル
//!
//! # 実装詳細
//! - `HashMap<JobId, JobRecord>` を tokio の Mutex で包む
//! - `conditional_update` はロックを握ったまま「検索 → ソート → 更新 → 返却」を行うので、
//!   同じレコードへの同時 claim は必ず直列化される
//! - 接続トポロジ（接続数、自動再接続、destroyed）もシミュレートする

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Filter, JobId, JobRecord, ReturnDocument, StoreError, StoreHealth, Update, UpdateOptions,
};
use crate::ports::JobStore;

/// Simulated driver topology.
#[derive(Debug, Clone)]
struct Topology {
    /// `None` = unified topology (no raw count exposed).
    active_connections: Option<usize>,
    auto_reconnect: bool,
    destroyed: bool,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            active_connections: Some(1),
            auto_reconnect: true,
            destroyed: false,
        }
    }
}

#[derive(Default)]
struct InMemoryStoreState {
    records: HashMap<JobId, JobRecord>,
    topology: Topology,

    /// One-shot failure returned by the next `conditional_update`.
    injected_failure: Option<StoreError>,

    /// Number of records mutated so far.
    update_count: usize,
}

/// In-memory job table.
#[derive(Default)]
pub struct InMemoryJobStore {
    state: Mutex<InMemoryStoreState>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record.
    pub async fn insert(&self, record: JobRecord) {
        let mut state = self.state.lock().await;
        state.records.insert(record.id, record);
    }

    pub async fn get(&self, id: JobId) -> Option<JobRecord> {
        let state = self.state.lock().await;
        state.records.get(&id).cloned()
    }

    /// Snapshot of all records, ordered by id.
    pub async fn records(&self) -> Vec<JobRecord> {
        let state = self.state.lock().await;
        let mut records: Vec<JobRecord> = state.records.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        records
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.records.is_empty()
    }

    pub async fn update_count(&self) -> usize {
        self.state.lock().await.update_count
    }

    /// Simulate losing every connection (e.g. the host resumed from sleep).
    pub async fn drop_connections(&self) {
        self.state.lock().await.topology.active_connections = Some(0);
    }

    pub async fn restore_connections(&self) {
        self.state.lock().await.topology.active_connections = Some(1);
    }

    pub async fn set_auto_reconnect(&self, enabled: bool) {
        self.state.lock().await.topology.auto_reconnect = enabled;
    }

    /// Permanently tear down the simulated client.
    pub async fn destroy(&self) {
        let mut state = self.state.lock().await;
        state.topology.active_connections = Some(0);
        state.topology.destroyed = true;
    }

    /// Unified topology hides the connection count; health is then reported as connected.
    pub async fn set_unified_topology(&self, unified: bool) {
        let mut state = self.state.lock().await;
        state.topology.active_connections = if unified { None } else { Some(1) };
    }

    /// Make the next `conditional_update` fail with `error`.
    pub async fn fail_next_update(&self, error: StoreError) {
        self.state.lock().await.injected_failure = Some(error);
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn conditional_update(
        &self,
        filter: &Filter,
        update: &Update,
        options: &UpdateOptions,
    ) -> Result<Option<JobRecord>, StoreError> {
        let mut state = self.state.lock().await;

        if let Some(err) = state.injected_failure.take() {
            return Err(err);
        }
        if state.topology.destroyed {
            return Err(StoreError::Connection("client destroyed".to_string()));
        }

        let Some(id) = state
            .records
            .values()
            .filter(|record| filter.matches(record))
            .min_by(|a, b| options.sort.compare(a, b))
            .map(|record| record.id)
        else {
            return Ok(None);
        };

        let Some(record) = state.records.get_mut(&id) else {
            return Ok(None);
        };
        let before = record.clone();
        update.apply(record);
        let after = record.clone();
        state.update_count += 1;

        Ok(Some(match options.return_document {
            ReturnDocument::Before => before,
            ReturnDocument::After => after,
        }))
    }

    async fn health(&self) -> Result<StoreHealth, StoreError> {
        let state = self.state.lock().await;
        let topology = &state.topology;
        Ok(StoreHealth::from_topology(
            topology.active_connections,
            topology.auto_reconnect,
            topology.destroyed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Connectivity, SortOrder};
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use ulid::Ulid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn id(n: u64) -> JobId {
        JobId::from_ulid(Ulid::from_parts(n, 0))
    }

    fn due_filter() -> Filter {
        Filter::due_by_schedule("email".into(), t0())
    }

    #[tokio::test]
    async fn updates_first_match_by_sort_order() {
        let store = InMemoryJobStore::new();
        store
            .insert(JobRecord::new(id(1), "email", t0() - TimeDelta::seconds(1)))
            .await;
        store
            .insert(JobRecord::new(id(2), "email", t0() - TimeDelta::seconds(30)))
            .await;

        let claimed = store
            .conditional_update(
                &due_filter(),
                &Update::lock(t0()),
                &UpdateOptions::new(SortOrder::default()),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(claimed.id, id(2));
        assert_eq!(claimed.locked_at, Some(t0()));
        assert_eq!(store.get(id(2)).await.unwrap().locked_at, Some(t0()));
        assert_eq!(store.get(id(1)).await.unwrap().locked_at, None);
        assert_eq!(store.update_count().await, 1);
    }

    #[tokio::test]
    async fn return_document_before_gives_original() {
        let store = InMemoryJobStore::new();
        store.insert(JobRecord::new(id(1), "email", t0())).await;

        let options =
            UpdateOptions::new(SortOrder::default()).return_document(ReturnDocument::Before);
        let original = store
            .conditional_update(&due_filter(), &Update::lock(t0()), &options)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(original.locked_at, None);
        assert_eq!(store.get(id(1)).await.unwrap().locked_at, Some(t0()));
    }

    #[tokio::test]
    async fn no_match_returns_none_and_mutates_nothing() {
        let store = InMemoryJobStore::new();
        store
            .insert(JobRecord::new(id(1), "email", t0() + TimeDelta::hours(1)))
            .await;
        let snapshot = store.records().await;

        let result = store
            .conditional_update(&due_filter(), &Update::lock(t0()), &UpdateOptions::default())
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.records().await, snapshot);
        assert_eq!(store.update_count().await, 0);
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let store = InMemoryJobStore::new();
        store.insert(JobRecord::new(id(1), "email", t0())).await;
        store
            .fail_next_update(StoreError::Connection("reset by peer".to_string()))
            .await;

        let first = store
            .conditional_update(&due_filter(), &Update::lock(t0()), &UpdateOptions::default())
            .await;
        assert_eq!(
            first.unwrap_err(),
            StoreError::Connection("reset by peer".to_string())
        );

        let second = store
            .conditional_update(&due_filter(), &Update::lock(t0()), &UpdateOptions::default())
            .await
            .unwrap();
        assert!(second.is_some());
    }

    #[tokio::test]
    async fn topology_drives_health() {
        let store = InMemoryJobStore::new();
        assert_eq!(
            store.health().await.unwrap().connectivity(),
            Connectivity::Healthy
        );

        store.drop_connections().await;
        assert_eq!(
            store.health().await.unwrap().connectivity(),
            Connectivity::Recoverable
        );

        store.set_unified_topology(true).await;
        assert_eq!(
            store.health().await.unwrap().connectivity(),
            Connectivity::Healthy
        );

        store.drop_connections().await;
        store.set_auto_reconnect(false).await;
        assert_eq!(
            store.health().await.unwrap().connectivity(),
            Connectivity::Unrecoverable
        );

        store.set_auto_reconnect(true).await;
        store.restore_connections().await;
        store.destroy().await;
        let health = store.health().await.unwrap();
        assert!(health.destroyed);
        assert_eq!(health.connectivity(), Connectivity::Unrecoverable);
    }
}
