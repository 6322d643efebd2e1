use std::env;
use thiserror::Error;

/// Notion APIキーの環境変数名
pub const ENV_NOTION_API_KEY: &str = "NOTION_API_KEY";
/// 登録先データベースIDの環境変数名
pub const ENV_NOTION_DATABASE_ID: &str = "NOTION_DATABASE_ID";
/// note検索キーワードの環境変数名
pub const ENV_NOTE_SEARCH_KEYWORD: &str = "NOTE_SEARCH_KEYWORD";

/// 設定関連のエラー型
/// 環境変数の欠落や設定値の検証エラーを定義
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 環境変数が見つからない
    #[error("環境変数が見つかりません: {name}")]
    MissingEnvironmentVariable { name: String },

    /// 設定値が不正
    #[error("設定値が不正です: {reason}")]
    InvalidValue { reason: String },
}

impl ConfigError {
    /// 環境変数不足エラーを作成
    pub fn missing_env_var<N: Into<String>>(name: N) -> Self {
        Self::MissingEnvironmentVariable { name: name.into() }
    }

    /// 不正な設定値エラーを作成
    pub fn invalid_value<R: Into<String>>(reason: R) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 設定エラーのResult型エイリアス
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// 実行時設定
///
/// プロセス起動時に一度だけ読み込まれ、以降は読み取り専用で扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub database_id: String,
    pub search_keyword: String,
}

impl Config {
    /// プロセスの環境変数から設定を読み込む
    ///
    /// `.env` の読み込みは呼び出し側（`main`）で事前に行う。
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> ConfigResult<String> {
            let value = lookup(name).ok_or_else(|| ConfigError::missing_env_var(name))?;
            if value.trim().is_empty() {
                return Err(ConfigError::invalid_value(format!("{} が空です", name)));
            }
            Ok(value)
        };

        Ok(Self {
            api_key: require(ENV_NOTION_API_KEY)?,
            database_id: require(ENV_NOTION_DATABASE_ID)?,
            search_keyword: require(ENV_NOTE_SEARCH_KEYWORD)?,
        })
    }
}
