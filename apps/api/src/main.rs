mod cards;
mod config;
mod errors;
mod ring;
mod routes;
mod state;
mod stats;
mod style;
mod text_fit;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cards API v{}", env!("CARGO_PKG_VERSION"));

    // Text-fit tables: built-in defaults or TEXT_METRICS_PATH override
    let text_metrics = config.load_text_metrics()?;
    info!(
        "Text metrics ready (normal glyph width {}px, max batch {} cards)",
        text_metrics.avg_char_width(style::FontPreset::Normal),
        config.max_batch_cards
    );

    let state = AppState::new(config.clone(), text_metrics);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the dashboard host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
