use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use analyzer::config::AppConfig;
use analyzer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;

    if cfg.factcheck_api_key.is_none() {
        warn!("GOOGLE_FACTCHECK_API_KEY not set: fact checking disabled");
    }
    if cfg.newsapi_key.is_none() {
        warn!("NEWSAPI_KEY not set: news search disabled");
    }

    let app_state = Arc::new(AppState::from_config(&cfg)?);

    // Warm the classifier in the background; requests arriving first share the same load.
    let runtime = app_state.runtime.clone();
    tokio::spawn(async move {
        if let Err(e) = runtime.classifier().await {
            warn!(error = %format!("{e:#}"), "classifier warm-up failed, will retry on first request");
        }
    });

    let app = analyzer::router(app_state);

    let addr = &cfg.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("analyzer listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
