use std::sync::Arc;

use crate::config::Config;
use crate::text_fit::TextMetrics;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Text-fit tables, loaded once at startup and read by every fit request.
    pub text_metrics: Arc<TextMetrics>,
}

impl AppState {
    pub fn new(config: Config, text_metrics: TextMetrics) -> Self {
        Self {
            config,
            text_metrics: Arc::new(text_metrics),
        }
    }
}
