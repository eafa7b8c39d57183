//! YouTube Comment Sentiment Analyzer binary entrypoint.
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use yt_sentiment_analyzer::api::{self, AppState};
use yt_sentiment_analyzer::config::AppConfig;
use yt_sentiment_analyzer::fetch::{CommentSource, YouTubeClient};
use yt_sentiment_analyzer::metrics::Metrics;
use yt_sentiment_analyzer::translate::{GtxTranslator, Translator};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("yt_sentiment_analyzer=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::load();
    if cfg.youtube_api_key.is_empty() {
        tracing::warn!("YOUTUBE_API_KEY is not set; comment fetching will fail until it is");
    }

    let source: Arc<dyn CommentSource> = Arc::new(YouTubeClient::new(
        cfg.youtube_api_key.clone(),
        cfg.http_timeout(),
    ));
    let translator: Arc<dyn Translator> = Arc::new(GtxTranslator::new(
        cfg.translate_endpoint(),
        cfg.http_timeout(),
    ));

    let metrics = Metrics::init();
    let app = api::create_router(AppState { source, translator }).merge(metrics.router());

    let addr = cfg.bind_addr().to_string();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await.context("serving")?;

    Ok(())
}
