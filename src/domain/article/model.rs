use serde::{Deserialize, Serialize};

/// noteのオリジン（相対URLの補完に使用）
pub const NOTE_ORIGIN: &str = "https://note.com";
/// タイトル要素が無い場合の既定値
pub const DEFAULT_TITLE: &str = "No Title";
/// 著者要素が無い場合の既定値
pub const DEFAULT_AUTHOR: &str = "不明";

/// 検索結果カード1件分の記事情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub url: String,
    pub author: String,
    pub like_count: u64,
}

/// `/` で始まる相対パスをnoteの絶対URLに変換する
///
/// それ以外の値はそのまま返す。
pub fn absolutize_url(href: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", NOTE_ORIGIN, href)
    } else {
        href.to_string()
    }
}

/// いいね数の表示文字列を数値に変換する
///
/// 桁区切りのカンマを除去し、ASCII数字のみで構成される場合に限り数値化する。
/// 空文字列・数字以外を含む文字列・桁あふれは0とする。
pub fn parse_like_count(text: &str) -> u64 {
    let digits = text.trim().replace(',', "");
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

/// 検索キーワードを埋め込んだnote検索URLを生成する
pub fn build_search_url(keyword: &str) -> String {
    format!(
        "{}/search?q={}&context=note&mode=search",
        NOTE_ORIGIN,
        urlencoding::encode(keyword)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolutize_relative_and_absolute() {
        assert_eq!(
            absolutize_url("/articles/1"),
            "https://note.com/articles/1"
        );
        assert_eq!(
            absolutize_url("https://example.com/n/abc"),
            "https://example.com/n/abc"
        );
        assert_eq!(absolutize_url(""), "");
    }

    #[test]
    fn test_parse_like_count_with_separators() {
        assert_eq!(parse_like_count("1,234"), 1234);
        assert_eq!(parse_like_count("2,500"), 2500);
        assert_eq!(parse_like_count("1,234,567"), 1_234_567);
        assert_eq!(parse_like_count("42"), 42);
    }

    #[test]
    fn test_parse_like_count_defaults_to_zero() {
        assert_eq!(parse_like_count(""), 0);
        assert_eq!(parse_like_count("abc"), 0);
        assert_eq!(parse_like_count("1.5k"), 0);
        assert_eq!(parse_like_count("-3"), 0);
        assert_eq!(parse_like_count("99999999999999999999999"), 0);
    }

    #[test]
    fn test_parse_like_count_rejects_full_width_digits() {
        // 数値化するのはASCII数字のみ
        assert_eq!(parse_like_count("１２３"), 0);
        assert_eq!(parse_like_count("1,２34"), 0);
    }

    #[test]
    fn test_build_search_url_encodes_keyword() {
        assert_eq!(
            build_search_url("growth hacking"),
            "https://note.com/search?q=growth%20hacking&context=note&mode=search"
        );
        assert_eq!(
            build_search_url("副業"),
            "https://note.com/search?q=%E5%89%AF%E6%A5%AD&context=note&mode=search"
        );
    }
}
