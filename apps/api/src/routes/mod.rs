pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/health", get(health::health_handler))
        .route("/api/v1/screen", post(handlers::handle_screen))
        .route("/api/v1/screen/csv", post(handlers::handle_screen_csv))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
