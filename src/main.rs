use std::sync::Arc;

use anyhow::Context;
use ytgbss::api::{AppState, create_router};
use ytgbss::config::Config;
use ytgbss::provider::YoutubeScraper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Held for the whole run; dropping it stops the file sink.
    let _log_guard = ytgbss::logging::init(&config)?;

    let provider = Arc::new(YoutubeScraper::new(config.provider_timeout())?);
    let state = AppState::from_config(provider, &config);
    let app = create_router(state, !config.no_legacy_routes);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        plan = %config.plan(),
        legacy_routes = !config.no_legacy_routes,
        "ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
    }
}
