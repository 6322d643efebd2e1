use crate::types::{InfraError, InfraResult};
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::spawn_blocking;
use tracing::debug;

/// ページ最下部までスクロールするスクリプト
const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";
/// Chromeからイベントが届かなくても接続を維持する時間
const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(600);

/// ブラウザ操作の抽象化トレイト
///
/// 実ブラウザ（headless Chrome）と固定マークアップを返すモックの両方を
/// 統一的に扱えるようにするためのインターフェースです。
/// セッションは呼び出し側が排他的に所有し、`close` で一度だけ閉じます。
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 指定されたURLへ遷移する
    async fn navigate(&self, url: &str) -> InfraResult<()>;

    /// セレクタに一致する要素が現れるまで待機する
    ///
    /// タイムアウトまでに現れなければ `Ok(false)` を返す。
    async fn wait_for(&self, selector: &str, timeout: Duration) -> InfraResult<bool>;

    /// ページ最下部までスクロールする
    async fn scroll_to_bottom(&self) -> InfraResult<()>;

    /// 現在描画されているHTML全体を取得する
    async fn current_markup(&self) -> InfraResult<String>;

    /// セッションを閉じる
    async fn close(self) -> InfraResult<()>
    where
        Self: Sized;
}

/// `headless_chrome` を使用した本番用のブラウザセッション
///
/// `Browser` の破棄時にChromeプロセスが終了するため、
/// エラーで早期リターンした場合もセッションは解放される。
pub struct ChromeSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// ヘッドレスChromeを起動して新しいタブを開く
    pub fn launch() -> InfraResult<Self> {
        let browser = Browser::new(LaunchOptions {
            args: vec![OsStr::new("--disable-gpu")],
            headless: true,
            sandbox: false,
            idle_browser_timeout: IDLE_BROWSER_TIMEOUT,
            ..LaunchOptions::default()
        })
        .map_err(|e| InfraError::browser("ブラウザの起動", e))?;

        let tab = browser
            .new_tab()
            .map_err(|e| InfraError::browser("タブの作成", e))?;

        Ok(Self { browser, tab })
    }

    /// ブロッキングなタブ操作を専用スレッドで実行する
    async fn with_tab<T, F>(&self, operation: &'static str, f: F) -> InfraResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Tab) -> anyhow::Result<T> + Send + 'static,
    {
        let tab = Arc::clone(&self.tab);
        spawn_blocking(move || f(&tab))
            .await
            .map_err(|e| InfraError::browser(operation, e))?
            .map_err(|e| InfraError::browser(operation, e))
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str) -> InfraResult<()> {
        let url = url.to_string();
        self.with_tab("ページ遷移", move |tab| {
            tab.navigate_to(&url)?.wait_until_navigated()?;
            Ok(())
        })
        .await
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> InfraResult<bool> {
        let selector = selector.to_string();
        let tab = Arc::clone(&self.tab);
        let found = spawn_blocking(move || {
            tab.wait_for_element_with_custom_timeout(&selector, timeout)
                .map(|_| ())
        })
        .await
        .map_err(|e| InfraError::browser("要素の待機", e))?;

        match found {
            Ok(()) => Ok(true),
            Err(e) => {
                debug!(error = %e, "要素の待機がタイムアウトしました");
                Ok(false)
            }
        }
    }

    async fn scroll_to_bottom(&self) -> InfraResult<()> {
        self.with_tab("スクロール", |tab| {
            tab.evaluate(SCROLL_TO_BOTTOM_JS, false)?;
            Ok(())
        })
        .await
    }

    async fn current_markup(&self) -> InfraResult<String> {
        self.with_tab("HTMLの取得", |tab| tab.get_content()).await
    }

    async fn close(self) -> InfraResult<()> {
        let result = self
            .with_tab("タブのクローズ", |tab| tab.close(true).map(|_| ()))
            .await;
        // Browserの破棄でChromeプロセスが終了する
        drop(self.browser);
        result
    }
}

/// テスト用のモックブラウザセッション
///
/// この実装はテスト時にDIされ、実際のブラウザを起動せずに
/// 定義済みのマークアップを返します。
pub struct MockBrowserSession {
    /// `current_markup` で返すHTML
    pub markup: String,
    /// `wait_for` で検索結果が現れたとみなすかどうか
    pub results_present: bool,
    visited: Mutex<Vec<String>>,
    scrolls: AtomicUsize,
    closed: Arc<AtomicBool>,
}

impl MockBrowserSession {
    /// 検索結果が表示されるモックセッションを作成
    pub fn new_with_markup(markup: &str) -> Self {
        Self {
            markup: markup.to_string(),
            results_present: true,
            visited: Mutex::new(Vec::new()),
            scrolls: AtomicUsize::new(0),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 検索結果の待機がタイムアウトするモックセッションを作成
    pub fn new_timeout() -> Self {
        Self {
            results_present: false,
            ..Self::new_with_markup("<html><body></body></html>")
        }
    }

    /// 遷移したURLの一覧
    pub fn visited_urls(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// スクロールが実行された回数
    pub fn scroll_count(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }

    /// クローズ済みかどうかを参照するフラグ（セッション破棄後も参照可能）
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

#[async_trait]
impl BrowserSession for MockBrowserSession {
    async fn navigate(&self, url: &str) -> InfraResult<()> {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(url.to_string());
        }
        Ok(())
    }

    async fn wait_for(&self, _selector: &str, _timeout: Duration) -> InfraResult<bool> {
        Ok(self.results_present)
    }

    async fn scroll_to_bottom(&self) -> InfraResult<()> {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn current_markup(&self) -> InfraResult<String> {
        Ok(self.markup.clone())
    }

    async fn close(self) -> InfraResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_session_records_interactions() {
        let session = MockBrowserSession::new_with_markup("<p>テスト</p>");

        session.navigate("https://note.com/search?q=a").await.unwrap();
        session.scroll_to_bottom().await.unwrap();
        session.scroll_to_bottom().await.unwrap();

        assert_eq!(session.visited_urls(), vec!["https://note.com/search?q=a"]);
        assert_eq!(session.scroll_count(), 2);
        assert!(session
            .wait_for(".card", Duration::ZERO)
            .await
            .unwrap());
        assert_eq!(session.current_markup().await.unwrap(), "<p>テスト</p>");
    }

    #[tokio::test]
    async fn test_mock_session_timeout_and_close() {
        let session = MockBrowserSession::new_timeout();
        let closed = session.closed_flag();

        assert!(!session.wait_for(".card", Duration::ZERO).await.unwrap());
        assert!(!closed.load(Ordering::SeqCst));

        session.close().await.unwrap();
        assert!(closed.load(Ordering::SeqCst));
    }

    /// 軽量オンラインテスト - 実際のChromeを起動して基本操作を確認
    #[cfg(feature = "online")]
    #[tokio::test(flavor = "multi_thread")]
    async fn test_chrome_session_online_basic() -> Result<(), anyhow::Error> {
        let session = match ChromeSession::launch() {
            Ok(session) => session,
            Err(e) => {
                println!("⚠️ Chromeの起動に失敗: {}", e);
                println!("Chromeがインストールされているか確認してください");
                return Ok(());
            }
        };

        session.navigate("data:text/html,<div class='card'>ok</div>").await?;
        assert!(session.wait_for(".card", Duration::from_secs(5)).await?);
        session.scroll_to_bottom().await?;
        let markup = session.current_markup().await?;
        assert!(markup.contains("card"), "描画されたHTMLを取得できるべき");
        session.close().await?;

        Ok(())
    }
}
