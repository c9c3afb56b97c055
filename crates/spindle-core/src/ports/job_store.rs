//! JobStore port - 共有ジョブテーブル
//!
//! Claimer がストアに要求するのは 2 つだけ:
//! - `conditional_update`: 条件に合う 1 件を選んで更新し、返す（レコード単位で atomic）
//! - `health`: 接続状態
//!
//! # 設計原則
//! - 排他はストアの atomic な find-one-and-update に任せる。
//!   Claimer 側で read-then-write はしない
//! - 複数件マッチしたら `UpdateOptions::sort` の先頭を選ぶ（決定的）

use async_trait::async_trait;

use crate::domain::{Filter, JobRecord, StoreError, StoreHealth, Update, UpdateOptions};

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Atomically pick the first record matching `filter` by `options.sort`,
    /// apply `update`, and return it.
    ///
    /// Concurrent calls whose filters match the same record are serialized:
    /// exactly one of them sees it. `Ok(None)` when nothing matches.
    async fn conditional_update(
        &self,
        filter: &Filter,
        update: &Update,
        options: &UpdateOptions,
    ) -> Result<Option<JobRecord>, StoreError>;

    async fn health(&self) -> Result<StoreHealth, StoreError>;
}
