use crate::types::{InfraError, InfraResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Notion APIのベースURL
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";
/// 送信するNotion-Versionヘッダの値
pub const NOTION_VERSION: &str = "2022-06-28";

/// ページ作成リクエストのボディ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCreateRequest {
    pub parent: DatabaseParent,
    pub properties: ArticleProperties,
}

/// 親データベースへの参照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseParent {
    pub database_id: String,
}

/// 記事データベースのプロパティ一式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleProperties {
    #[serde(rename = "Name")]
    pub name: TitleProperty,
    #[serde(rename = "URL")]
    pub url: UrlProperty,
    #[serde(rename = "AUTHOR")]
    pub author: RichTextProperty,
    #[serde(rename = "LIKE")]
    pub like: NumberProperty,
    #[serde(rename = "Keyword")]
    pub keyword: RichTextProperty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleProperty {
    pub title: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextProperty {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlProperty {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberProperty {
    pub number: u64,
}

/// `{"type": "text", "text": {"content": ...}}` 形式のテキスト片
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: TextContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

impl RichText {
    /// プレーンテキストのテキスト片を作成
    pub fn plain(content: &str) -> Self {
        Self {
            kind: "text".to_string(),
            text: TextContent {
                content: content.to_string(),
            },
        }
    }
}

impl TitleProperty {
    pub fn plain(content: &str) -> Self {
        Self {
            title: vec![RichText::plain(content)],
        }
    }
}

impl RichTextProperty {
    pub fn plain(content: &str) -> Self {
        Self {
            rich_text: vec![RichText::plain(content)],
        }
    }
}

/// APIレスポンスのステータスと本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// 登録成功とみなすレスポンスかどうか（200または201のみ）
    pub fn is_created(&self) -> bool {
        matches!(self.status, 200 | 201)
    }
}

/// Notion APIクライアントの抽象化トレイト
///
/// 実際のHTTP通信とモック実装の両方を統一的に扱えるようにするための
/// インターフェースです。ステータスコードによる成否判定は呼び出し側で行い、
/// 通信自体の失敗のみを `Err` として返します。
#[async_trait]
pub trait NotionClient: Send + Sync {
    /// データベースにページを1件作成する
    async fn create_page(&self, request: &PageCreateRequest) -> InfraResult<ApiResponse>;
}

/// `reqwest` を使用した本番用のNotion APIクライアント実装
pub struct ReqwestNotionClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ReqwestNotionClient {
    /// 新しいNotion APIクライアントを作成
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// 接続先を指定してクライアントを作成（モックサーバー向け）
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn pages_url(&self) -> String {
        format!("{}/pages", self.base_url)
    }
}

#[async_trait]
impl NotionClient for ReqwestNotionClient {
    async fn create_page(&self, request: &PageCreateRequest) -> InfraResult<ApiResponse> {
        let url = self.pages_url();
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| InfraError::http(format!("Notion APIへの送信に失敗: {}", url), e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| InfraError::http("レスポンステキストの取得に失敗", e))?;

        Ok(ApiResponse { status, body })
    }
}

/// テスト用のモックNotionクライアント
///
/// 受け取ったリクエストを記録し、定義済みのステータスを返します。
pub struct MockNotionClient {
    /// モック時に返すステータスコード
    pub status: u16,
    /// モック時に返すレスポンス本文
    pub body: String,
    requests: Mutex<Vec<PageCreateRequest>>,
}

impl MockNotionClient {
    /// 登録成功を返すモッククライアントを作成
    pub fn new_success() -> Self {
        Self::new_status(200, r#"{"object":"page"}"#)
    }

    /// 指定ステータスを返すモッククライアントを作成
    pub fn new_status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 受け取ったリクエストの一覧
    pub fn requests(&self) -> Vec<PageCreateRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotionClient for MockNotionClient {
    async fn create_page(&self, request: &PageCreateRequest) -> InfraResult<ApiResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(ApiResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
