//! Claimer - 次のジョブを 1 件選んでロックする
//!
//! # フロー
//! 1. ストアの接続状態を確認（断線なら回復可能かどうかで分岐）
//! 2. 2 つの条件を組み立てる（due-by-schedule / abandoned-lock）
//! 3. 条件付き更新を 1 回（SingleStep）または最大 2 回（TwoStep）発行
//! 4. 返ってきたレコードを JobHandle に包む
//!
//! 排他はストアの atomic な条件付き更新に任せる。複数プロセスが同時に
//! 同じテーブルへ claim しても、1 レコードを取れるのは 1 プロセスだけ。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use super::config::{ClaimConfig, ClaimStrategy};
use crate::domain::{
    ClaimError, Connectivity, Filter, JobDefinition, JobHandle, JobName, JobRecord,
    SchedulerContext, SchedulerEvent, StoreError, Update, UpdateOptions,
};
use crate::impls::NoopEventSink;
use crate::ports::{Clock, EventSink, JobStore, SystemClock};

const CONNECTION_LOST_MESSAGE: &str = "Lost job store connection";

pub struct Claimer {
    store: Arc<dyn JobStore>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
    scheduler: Arc<SchedulerContext>,
    config: ClaimConfig,
}

impl Claimer {
    /// Wall clock, no event sink. Use the `with_*` methods to swap them.
    pub fn new(
        store: Arc<dyn JobStore>,
        scheduler: Arc<SchedulerContext>,
        config: ClaimConfig,
    ) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            events: Arc::new(NoopEventSink),
            scheduler,
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn config(&self) -> &ClaimConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &SchedulerContext {
        &self.scheduler
    }

    /// Find the next eligible job named `name` and lock it.
    ///
    /// `scan_horizon` is the polling loop's current `next_scan_at`: unlocked
    /// jobs due after it are left for a later scan.
    ///
    /// Returns `Ok(None)` when nothing is eligible, and also when the store
    /// connection is lost but will come back (a `ConnectionLost` event is
    /// emitted). Fails with `ClaimError::StoreUnrecoverable` when the store
    /// cannot reconnect, and with `ClaimError::Store` when the update itself
    /// fails.
    pub async fn claim_next(
        &self,
        name: &JobName,
        definition: &JobDefinition,
        scan_horizon: DateTime<Utc>,
    ) -> Result<Option<JobHandle>, ClaimError> {
        // sampled once: the deadline and the stamped lock must agree
        let now = self.clock.now();
        let lock_deadline = definition.lock_deadline(now);
        debug!(
            job_name = %name,
            strategy = self.config.strategy.as_str(),
            "find and lock next job"
        );

        let health = self.store.health().await?;
        match health.connectivity() {
            Connectivity::Healthy => {}
            Connectivity::Recoverable => {
                warn!(
                    job_name = %name,
                    "missing job store connection, not attempting to lock a job"
                );
                self.events
                    .emit(SchedulerEvent::connection_lost(CONNECTION_LOST_MESSAGE))
                    .await;
                return Ok(None);
            }
            Connectivity::Unrecoverable => {
                error!(
                    job_name = %name,
                    reconnectable = health.reconnectable,
                    destroyed = health.destroyed,
                    "job store connection is not recoverable"
                );
                return Err(ClaimError::StoreUnrecoverable {
                    reconnectable: health.reconnectable,
                    destroyed: health.destroyed,
                });
            }
        }

        let due = Filter::due_by_schedule(name.clone(), scan_horizon);
        let abandoned = Filter::abandoned_lock(name.clone(), lock_deadline);
        let update = Update::lock(now);
        let options = UpdateOptions::new(self.config.sort.clone());

        let record = match self.config.strategy {
            ClaimStrategy::SingleStep => {
                let filter = Filter::any([due, abandoned]);
                self.lock_one(&filter, &update, &options).await?
            }
            ClaimStrategy::TwoStep => match self.lock_one(&abandoned, &update, &options).await? {
                Some(record) => Some(record),
                None => self.lock_one(&due, &update, &options).await?,
            },
        };

        Ok(record.map(|record| {
            debug!(job_id = %record.id, job_name = %name, "found a job available to lock");
            JobHandle::new(record, Arc::clone(&self.scheduler))
        }))
    }

    async fn lock_one(
        &self,
        filter: &Filter,
        update: &Update,
        options: &UpdateOptions,
    ) -> Result<Option<JobRecord>, StoreError> {
        self.store.conditional_update(filter, update, options).await
    }
}
