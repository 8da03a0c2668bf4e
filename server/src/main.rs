mod api;
mod config;
mod sample;
mod websocket;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use hueprobe::ColorTable;
use tokio::sync::broadcast;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::websocket::DetectionState;

/// Shared application state
pub struct AppState {
    /// Reference colors, loaded once and never modified
    pub table: &'static ColorTable,
    pub config: Config,
    pub detections: DetectionState,
    /// Broadcast channel for UI updates
    pub ui_broadcast: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(table: &'static ColorTable, config: Config) -> Self {
        let (ui_broadcast, _) = broadcast::channel(100);
        Self {
            table,
            config,
            detections: DetectionState::new(),
            ui_broadcast,
        }
    }
}

/// Build the application router
pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .nest("/api", api::router())
        .nest("/ws", websocket::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hueprobe_server=debug,hueprobe=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    // No queries are served without a reference table
    let table = hueprobe::global::load(&config.colors_path)
        .inspect_err(|e| tracing::error!("Cannot load color table: {}", e))?;
    if table.is_empty() {
        tracing::warn!("Color table {} is empty, color queries will fail", table.source());
    }

    let state = Arc::new(AppState::new(table, config.clone()));

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("hueprobe server listening on {}", config.bind_address);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
