pub mod extract;
pub mod model;
pub mod service;

// 公開APIの再エクスポート

// model.rsから
pub use model::{
    absolutize_url, build_search_url, parse_like_count, ArticleRecord, DEFAULT_AUTHOR,
    DEFAULT_TITLE, NOTE_ORIGIN,
};

// extract.rsから
pub use extract::{count_cards, extract_articles, extract_card, extract_cards, CARD_SELECTOR};

// service.rsから
pub use service::{scrape_note_articles, ScrapeOptions};
