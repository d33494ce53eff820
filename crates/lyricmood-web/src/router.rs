//! Axum router — maps all URL paths to handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{home::home, predict::predict};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/",        get(home))
        .route("/predict", post(predict))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))

        // Middleware
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
