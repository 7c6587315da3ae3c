use axum::{extract::State, Json};

use crate::cards::preview::{run_preview, CardPreviewRequest, CardPreviewResponse};
use crate::errors::AppError;
use crate::ring::handlers::MAX_RING_SEGMENTS;
use crate::state::AppState;
use crate::stats::handlers::MAX_CANDIDATES;
use crate::text_fit::handlers::validate_text;

fn validate_batch(req: &CardPreviewRequest, max_cards: usize) -> Result<(), AppError> {
    if req.cards.len() > max_cards {
        return Err(AppError::Validation(format!(
            "batch has {} cards, at most {max_cards} are allowed",
            req.cards.len()
        )));
    }
    for card in &req.cards {
        if card.ring_segment_count() > MAX_RING_SEGMENTS {
            return Err(AppError::Validation(format!(
                "card {} has {} ring segments, at most {MAX_RING_SEGMENTS} are allowed",
                card.id,
                card.ring_segment_count()
            )));
        }
        if card.stats.len() > MAX_CANDIDATES {
            return Err(AppError::Validation(format!(
                "card {} has {} stats, at most {MAX_CANDIDATES} are allowed",
                card.id,
                card.stats.len()
            )));
        }
        validate_text(&card.name)?;
        validate_text(&card.symbol)?;
    }
    Ok(())
}

/// POST /api/v1/cards/preview
pub async fn handle_card_preview(
    State(state): State<AppState>,
    Json(req): Json<CardPreviewRequest>,
) -> Result<Json<CardPreviewResponse>, AppError> {
    validate_batch(&req, state.config.max_batch_cards)?;
    let response = run_preview(req, state.text_metrics.clone()).await?;
    Ok(Json(response))
}
