//! Errors - エラー型と分類
//!
//! - `StoreError`: ストア操作そのものの失敗。Claimer は手を加えずにそのまま返す
//! - `ClaimError`: Claimer の呼び出し元が受け取るエラー

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store serialization error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ClaimError {
    /// The host process must restart; never retried internally.
    #[error(
        "job store connection is not recoverable, application restart required \
         (reconnectable={reconnectable}, destroyed={destroyed})"
    )]
    StoreUnrecoverable { reconnectable: bool, destroyed: bool },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClaimError {
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, ClaimError::StoreUnrecoverable { .. })
    }
}
