use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod generator;
mod handlers;
mod store;

use generator::RandomIdGenerator;
use store::LinkStore;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub config: config::AppConfig,
    pub store: LinkStore,
}

impl AppState {
    /// Build the state with a random-id store configured from `config`.
    pub fn new(config: config::AppConfig) -> Self {
        let generator = Arc::new(RandomIdGenerator::new(config.short_id_length));
        let store = LinkStore::new(generator)
            .with_max_attempts(config.max_generation_attempts)
            .with_strict_urls(config.strict_urls);
        Self { config, store }
    }
}

// ── Router ─────────────────────────────────────────────────────────────────

pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(|| async { axum::http::StatusCode::OK }))
        // GET /shorten is looked up like any other id, so it answers the JSON 404
        .route(
            "/shorten",
            post(handlers::shorten::shorten).get(handlers::redirect::redirect),
        )
        // Short-id redirect: static routes above take priority
        .route("/:short_id", get(handlers::redirect::redirect))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// ── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (ignore error if file is absent — env vars may already be set)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tinylink=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::AppConfig::from_env()?;
    tracing::info!(
        "Short ids: {} chars, {} attempt(s), strict URLs: {}",
        config.short_id_length,
        config.max_generation_attempts,
        config.strict_urls
    );

    let bind_addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("Server is running on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(
        "Server stopped, dropping {} mapping(s)",
        state.store.len()
    );

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
