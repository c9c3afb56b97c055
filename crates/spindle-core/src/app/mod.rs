//! App - アプリケーション層
//!
//! ports を組み合わせて claim のロジックを実装する。
//!
//! # 主要コンポーネント
//! - **Claimer**: 次のジョブを atomic に選んでロックする
//! - **ClaimConfig**: claim 戦略とソート順

pub mod claimer;
pub mod config;

pub use self::claimer::Claimer;
pub use self::config::{ClaimConfig, ClaimStrategy, TWO_STEP_ENV};
