//! ClaimConfig - Claimer の設定
//!
//! プロセス全体のグローバル状態にはせず、Claimer の構築時に渡す。
//! テストごとに別の設定を持てるので、並列テストでも干渉しない。

use crate::domain::SortOrder;

/// Environment variable that switches on the two-step claim.
pub const TWO_STEP_ENV: &str = "SPINDLE_FIND_JOBS_TWO_STEPS";

/// How many conditional updates a claim issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimStrategy {
    /// One update over `due OR abandoned`.
    #[default]
    SingleStep,
    /// Abandoned locks first, then due jobs.
    TwoStep,
}

impl ClaimStrategy {
    /// Only the exact string `"true"` selects `TwoStep`.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("true") => ClaimStrategy::TwoStep,
            _ => ClaimStrategy::SingleStep,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStrategy::SingleStep => "single_step",
            ClaimStrategy::TwoStep => "two_step",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimConfig {
    pub strategy: ClaimStrategy,
    pub sort: SortOrder,
}

impl ClaimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default sort; strategy from `SPINDLE_FIND_JOBS_TWO_STEPS`.
    pub fn from_env() -> Self {
        let value = std::env::var(TWO_STEP_ENV).ok();
        Self {
            strategy: ClaimStrategy::from_env_value(value.as_deref()),
            sort: SortOrder::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: ClaimStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}
