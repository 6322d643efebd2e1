//! noteの検索結果をスクレイピングし、記事情報をNotionデータベースへ登録する。
//!
//! - `infra`: ヘッドレスChromeとNotion APIへのアクセス（モック差し替え可能）
//! - `domain`: 記事カードの抽出、検索処理、Notionへの登録
//! - `app`: 一連の処理を順に実行するワークフロー
//! - `types`: 設定・エラー・集計結果の型

pub mod app;
pub mod domain;
pub mod infra;
pub mod types;
