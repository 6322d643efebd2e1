//! Notionデータベースへの記事登録
//!
//! 記事情報をページ作成リクエストに変換し、1件ずつ登録する。
//! 登録失敗（200/201以外）はログに残して処理を続行する。

use crate::domain::article::ArticleRecord;
use crate::infra::api::notion::{
    ArticleProperties, DatabaseParent, NotionClient, NumberProperty, PageCreateRequest,
    RichTextProperty, TitleProperty, UrlProperty,
};
use anyhow::{Context, Result};
use tracing::{error, info};

/// 記事情報と検索キーワードからページ作成リクエストを組み立てる
pub fn build_page_request(
    database_id: &str,
    article: &ArticleRecord,
    keyword: &str,
) -> PageCreateRequest {
    PageCreateRequest {
        parent: DatabaseParent {
            database_id: database_id.to_string(),
        },
        properties: ArticleProperties {
            name: TitleProperty::plain(&article.title),
            url: UrlProperty {
                url: article.url.clone(),
            },
            author: RichTextProperty::plain(&article.author),
            like: NumberProperty {
                number: article.like_count,
            },
            keyword: RichTextProperty::plain(keyword),
        },
    }
}

/// # 概要
/// 記事1件をNotionデータベースに登録する。
///
/// ## 戻り値
/// 登録に成功した場合は`true`、APIが200/201以外を返した場合は`false`。
///
/// ## エラー
/// 通信自体に失敗した場合のみエラーを返す。再試行は行わない。
pub async fn register_article<N: NotionClient + ?Sized>(
    client: &N,
    database_id: &str,
    article: &ArticleRecord,
    keyword: &str,
) -> Result<bool> {
    let request = build_page_request(database_id, article, keyword);
    let response = client
        .create_page(&request)
        .await
        .with_context(|| format!("Notionへの登録リクエストに失敗: {}", article.title))?;

    if response.is_created() {
        info!("✅ Notion登録成功: {}", article.title);
        Ok(true)
    } else {
        error!(
            status = response.status,
            body = %response.body,
            "❌ Notion登録失敗: {} (Status Code: {})",
            article.title,
            response.status
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::api::notion::MockNotionClient;

    fn growth_tips() -> ArticleRecord {
        ArticleRecord {
            title: "Growth Tips".to_string(),
            url: "https://note.com/articles/1".to_string(),
            author: "Jane".to_string(),
            like_count: 2500,
        }
    }

    #[test]
    fn test_build_page_request_maps_all_fields() {
        let request = build_page_request("db-123", &growth_tips(), "副業");

        assert_eq!(request.parent.database_id, "db-123");
        assert_eq!(request.properties.name.title[0].text.content, "Growth Tips");
        assert_eq!(request.properties.url.url, "https://note.com/articles/1");
        assert_eq!(request.properties.author.rich_text[0].text.content, "Jane");
        assert_eq!(request.properties.like.number, 2500);
        assert_eq!(request.properties.keyword.rich_text[0].text.content, "副業");
    }

    #[tokio::test]
    async fn test_register_article_success() -> Result<(), anyhow::Error> {
        let mock_client = MockNotionClient::new_success();

        let created = register_article(&mock_client, "db-123", &growth_tips(), "副業").await?;

        assert!(created);
        assert_eq!(mock_client.requests().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_article_rejected_does_not_error() -> Result<(), anyhow::Error> {
        let mock_client =
            MockNotionClient::new_status(400, r#"{"object":"error","code":"validation_error"}"#);

        let created = register_article(&mock_client, "db-123", &growth_tips(), "副業").await?;

        assert!(!created, "400は登録失敗として扱うべき");
        Ok(())
    }
}
