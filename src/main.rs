use anyhow::{Context, Result};
use note_notion_sync::{
    app::execute_note_workflow,
    domain::article::ScrapeOptions,
    infra::{api::notion::ReqwestNotionClient, browser::ChromeSession},
    types::Config,
};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt().with_env_filter(filter).with_target(false).init();

    let config = Config::from_env().context("設定の読み込みに失敗")?;
    let session = ChromeSession::launch().context("ヘッドレスChromeの起動に失敗")?;
    let client = ReqwestNotionClient::new(&config.api_key);

    execute_note_workflow(session, &client, &config, &ScrapeOptions::default()).await?;

    Ok(())
}
