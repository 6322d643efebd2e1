use crate::{
    domain::{
        article::{scrape_note_articles, ScrapeOptions},
        notion::register_article,
    },
    infra::{api::notion::NotionClient, browser::BrowserSession},
    types::{Config, UploadSummary},
};
use anyhow::Result;
use tracing::{info, warn};

/// note→Notion登録ワークフローのメイン実行関数（依存性を注入）
///
/// 1. 設定されたキーワードでnoteの検索結果を取得
/// 2. 取得した記事を検索順に1件ずつNotionへ登録
/// 3. ブラウザセッションを閉じる
///
/// セッションは値で受け取り、この関数の終了までに必ず解放される。
/// 個々の登録失敗は集計されるだけで、エラーにはならない。
pub async fn execute_note_workflow<S: BrowserSession, N: NotionClient>(
    session: S,
    client: &N,
    config: &Config,
    options: &ScrapeOptions,
) -> Result<UploadSummary> {
    let keyword = config.search_keyword.as_str();
    info!("🔍 キーワード『{}』でnote記事を検索中...", keyword);

    let articles = scrape_note_articles(&session, keyword, options).await?;
    info!("✅ 記事 {} 件取得", articles.len());

    let mut summary = UploadSummary::default();
    for article in &articles {
        let created = register_article(client, &config.database_id, article, keyword).await?;
        summary.record(created);
    }

    if let Err(e) = session.close().await {
        warn!(error = %e, "ブラウザセッションのクローズに失敗しました");
    }

    info!("🎉 全記事の登録完了!");
    info!("{}", summary);
    Ok(summary)
}
