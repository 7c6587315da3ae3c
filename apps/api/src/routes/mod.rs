pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cards::handlers as cards;
use crate::ring::handlers as ring;
use crate::state::AppState;
use crate::stats::handlers as stats;
use crate::text_fit::handlers as text_fit;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Ownership rings
        .route("/api/v1/ring/strokes", post(ring::handle_ring_strokes))
        .route("/api/v1/ring/svg", post(ring::handle_ring_svg))
        // Stat layout
        .route("/api/v1/stats/layout", post(stats::handle_compose_layout))
        .route("/api/v1/stats/styles/:style", get(stats::handle_get_style))
        // Text fit
        .route("/api/v1/text/fit", post(text_fit::handle_fit_text))
        // Batch preview
        .route("/api/v1/cards/preview", post(cards::handle_card_preview))
        .with_state(state)
}
