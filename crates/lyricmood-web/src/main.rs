//! Lyric Mood Web Server
//!
//! Run with: cargo run -p lyricmood-web

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lyricmood_model::ArtifactBundle;
use lyricmood_web::config::Config;
use lyricmood_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let (config, source) = Config::load()?;

    // Initialize tracing; RUST_LOG wins over the debug flag
    let default_level = if config.server.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Lyric Mood Web Server...");
    info!("Configuration: {}", source);

    // Load artifacts once; failure only disables prediction
    let paths = config.artifacts.paths();
    let bundle = tokio::task::spawn_blocking(move || ArtifactBundle::load(&paths)).await?;
    if !bundle.is_loaded() {
        warn!("Prediction disabled until the server is restarted with valid artifacts");
    }

    let state = AppState::new(bundle, config.server.debug)?;
    let app = lyricmood_web::router::build_router(state, &config.server.static_dir);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
