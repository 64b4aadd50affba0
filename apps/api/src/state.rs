use std::sync::Arc;

use crate::config::Config;
use crate::screening::embedder::Embedder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Process-wide embedding model. Loaded once (lazily unless EMBEDDING_WARMUP
    /// is set) and shared read-only by every request.
    pub embedder: Arc<dyn Embedder>,
}
