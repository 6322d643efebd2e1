//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - 設定とその読み込みエラー
//! - インフラ層のエラーと登録結果の集計型

pub mod config;
pub mod infra;

// 便利な再エクスポート
pub use config::{Config, ConfigError, ConfigResult};
pub use infra::{BoxError, InfraError, InfraResult, UploadSummary};
