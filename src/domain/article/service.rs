use super::extract::{count_cards, extract_cards, CARD_SELECTOR};
use super::model::{build_search_url, ArticleRecord};
use crate::infra::browser::BrowserSession;
use anyhow::{Context, Result};
use std::time::Duration;
use scraper::Html;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// 検索結果ページ取得時の待機・スクロール設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// ページ遷移後の固定待機時間
    pub settle_delay: Duration,
    /// 検索結果カードの出現を待つ最大時間
    pub wait_timeout: Duration,
    /// 最下部までスクロールする回数
    pub scroll_count: usize,
    /// スクロールごとの待機時間
    pub scroll_pause: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(5),
            wait_timeout: Duration::from_secs(10),
            scroll_count: 5,
            scroll_pause: Duration::from_secs(1),
        }
    }
}

impl ScrapeOptions {
    /// 待機時間を全て0にした設定（テスト用）
    pub fn without_delays() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            wait_timeout: Duration::ZERO,
            scroll_pause: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// 遅延読み込みの記事を描画させるため、最下部へのスクロールを繰り返す
async fn scroll_down<S: BrowserSession>(session: &S, options: &ScrapeOptions) -> Result<()> {
    for i in 0..options.scroll_count {
        session
            .scroll_to_bottom()
            .await
            .with_context(|| format!("{}回目のスクロールに失敗", i + 1))?;
        sleep(options.scroll_pause).await;
    }
    Ok(())
}

/// 指定キーワードでnoteの検索結果を開き、記事情報を取得する
///
/// 検索結果が表示されない場合やカードが1件も無い場合は警告を出して空のリストを返す。
/// ブラウザ操作自体の失敗はエラーとして伝播する。
pub async fn scrape_note_articles<S: BrowserSession>(
    session: &S,
    keyword: &str,
    options: &ScrapeOptions,
) -> Result<Vec<ArticleRecord>> {
    let search_url = build_search_url(keyword);
    debug!(url = %search_url, "検索ページへ遷移");

    session
        .navigate(&search_url)
        .await
        .with_context(|| format!("検索ページへの遷移に失敗: {}", search_url))?;
    sleep(options.settle_delay).await;

    let appeared = session
        .wait_for(CARD_SELECTOR, options.wait_timeout)
        .await
        .context("検索結果の待機に失敗")?;
    if !appeared {
        warn!("⚠️ 検索結果が表示されませんでした。");
        return Ok(Vec::new());
    }

    scroll_down(session, options).await?;

    let html = session
        .current_markup()
        .await
        .context("描画済みHTMLの取得に失敗")?;

    let document = Html::parse_document(&html);
    let card_count = count_cards(&document);
    if card_count == 0 {
        warn!("⚠️ 記事が見つかりませんでした。");
        return Ok(Vec::new());
    }

    let articles = extract_cards(&document);
    if articles.len() < card_count {
        debug!(
            cards = card_count,
            skipped = card_count - articles.len(),
            "リンクの無いカードをスキップしました"
        );
    }
    info!(cards = card_count, "検索結果カードを解析しました");

    Ok(articles)
}
