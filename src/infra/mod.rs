//! インフラ層
//!
//! 外部のブラウザとNotion APIをトレイトの背後に隠し、
//! テスト時にモック実装を差し込めるようにする。

pub mod api;
pub mod browser;
