use crate::types::ConfigError;
use thiserror::Error;

/// 境界を越えて受け渡すための汎用エラー型
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// インフラストラクチャ層のエラー型
/// ブラウザ操作やHTTP通信など基盤的なエラーを定義
#[derive(Error, Debug)]
pub enum InfraError {
    /// ブラウザ操作エラー
    #[error("ブラウザ操作エラー: {operation} - {source}")]
    Browser {
        operation: String,
        #[source]
        source: BoxError,
    },

    /// HTTP通信エラー
    #[error("HTTP通信エラー: {context} - {source}")]
    Http {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// 設定エラー
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl InfraError {
    /// ブラウザ操作エラーを作成
    pub fn browser<O, E>(operation: O, source: E) -> Self
    where
        O: Into<String>,
        E: Into<BoxError>,
    {
        Self::Browser {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// HTTP通信エラーを作成
    pub fn http<C: Into<String>>(context: C, source: reqwest::Error) -> Self {
        Self::Http {
            context: context.into(),
            source,
        }
    }
}

/// インフラエラーのResult型エイリアス
pub type InfraResult<T> = std::result::Result<T, InfraError>;

/// Notionへの登録結果を表す構造体
/// 登録成功件数と失敗件数を記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    /// 登録に成功した件数
    pub registered: usize,
    /// 登録に失敗した件数
    pub failed: usize,
}

impl UploadSummary {
    /// 新しい登録結果を作成
    pub fn new(registered: usize, failed: usize) -> Self {
        Self { registered, failed }
    }

    /// 空の結果（全て0）を作成
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// 1件分の結果を加算する
    pub fn record(&mut self, success: bool) {
        if success {
            self.registered += 1;
        } else {
            self.failed += 1;
        }
    }

    /// 処理した総件数
    pub fn total(&self) -> usize {
        self.registered + self.failed
    }
}

impl Default for UploadSummary {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Notion登録結果: 成功{}件、失敗{}件",
            self.registered, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_summary_counts() {
        let mut summary = UploadSummary::default();
        summary.record(true);
        summary.record(false);
        summary.record(true);

        assert_eq!(summary, UploadSummary::new(2, 1));
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.to_string(), "Notion登録結果: 成功2件、失敗1件");
    }

    #[test]
    fn test_browser_error_keeps_source() {
        let err = InfraError::browser("ページ遷移", anyhow::anyhow!("接続拒否"));
        let message = err.to_string();
        assert!(message.contains("ページ遷移"));
        assert!(message.contains("接続拒否"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = InfraError::from(ConfigError::missing_env_var("NOTION_API_KEY"));
        assert_eq!(err.to_string(), "環境変数が見つかりません: NOTION_API_KEY");
    }
}
