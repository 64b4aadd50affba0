mod config;
mod errors;
mod models;
mod routes;
mod screening;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::screening::{Embedder, FastEmbedder, HashEmbedder, ModelChoice};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Shortlist v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the embedding model handle (weights load lazily unless warmed up)
    let embedder = build_embedder(&config).await?;
    info!("Embedder initialized (model: {})", embedder.model_name());

    // Build app state
    let state = AppState {
        config: config.clone(),
        embedder,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the process-wide embedder selected by `EMBEDDING_MODEL`.
async fn build_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    if config.embedding_model == ModelChoice::Hash {
        return Ok(Arc::new(HashEmbedder::default()));
    }

    let embedder = Arc::new(FastEmbedder::new(
        config.embedding_model,
        config.model_cache_dir.clone(),
    ));

    if config.embedding_warmup {
        let warm = Arc::clone(&embedder);
        tokio::task::spawn_blocking(move || warm.warm_up())
            .await
            .context("model warm-up task panicked")?
            .context("failed to load embedding model at startup")?;
    }

    Ok(embedder)
}
