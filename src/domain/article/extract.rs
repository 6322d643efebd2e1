use super::model::{absolutize_url, parse_like_count, ArticleRecord, DEFAULT_AUTHOR, DEFAULT_TITLE};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// 検索結果カードのセレクタ
pub const CARD_SELECTOR: &str = ".m-largeNoteWrapper__card";

static SEL_CARD: LazyLock<Selector> = LazyLock::new(|| css(CARD_SELECTOR));
static SEL_TITLE: LazyLock<Selector> = LazyLock::new(|| css("h3.m-noteBodyTitle__title"));
static SEL_LINK: LazyLock<Selector> = LazyLock::new(|| css("a.m-largeNoteWrapper__link"));
static SEL_AUTHOR: LazyLock<Selector> =
    LazyLock::new(|| css(".o-largeNoteSummary__userName"));
static SEL_LIKE: LazyLock<Selector> =
    LazyLock::new(|| css("span.pl-2.text-sm.text-text-secondary"));

fn css(selector: &'static str) -> Selector {
    Selector::parse(selector).expect("固定のCSSセレクタは常に解析できる")
}

/// 要素内のテキストノードをそれぞれ前後の空白を除いて連結する
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn select_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector).next().map(stripped_text)
}

/// 検索結果カード1件から記事情報を抽出する
///
/// リンク要素が無いカードは `None`。それ以外の欠落項目は既定値で補う。
pub fn extract_card(card: ElementRef<'_>) -> Option<ArticleRecord> {
    let link = card.select(&SEL_LINK).next()?;
    let url = absolutize_url(link.value().attr("href").unwrap_or(""));

    let title = select_text(card, &SEL_TITLE).unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let author = select_text(card, &SEL_AUTHOR).unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
    let like_count = select_text(card, &SEL_LIKE)
        .map(|text| parse_like_count(&text))
        .unwrap_or(0);

    Some(ArticleRecord {
        title,
        url,
        author,
        like_count,
    })
}

/// 解析済みドキュメントから検索結果カードを全て抽出する
///
/// 戻り値はDOM上のカードの順序を保つ。
pub fn extract_cards(document: &Html) -> Vec<ArticleRecord> {
    document.select(&SEL_CARD).filter_map(extract_card).collect()
}

/// 描画済みHTMLを解析して検索結果カードを全て抽出する
pub fn extract_articles(html: &str) -> Vec<ArticleRecord> {
    extract_cards(&Html::parse_document(html))
}

/// 解析済みドキュメント中の検索結果カード数を数える
pub fn count_cards(document: &Html) -> usize {
    document.select(&SEL_CARD).count()
}
