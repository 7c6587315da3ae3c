//! Card preview: runs all three card computations for a batch of cards.
//!
//! Style, font preset, snap state and the user's active set are shared across the batch,
//! as they come from one preference snapshot. Everything else is per card.
//!
//! `preview_cards` is the synchronous, CPU-bound core. `run_preview` wraps it in
//! `tokio::task::spawn_blocking` and stamps the response.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ring::geometry::{compute_ring_strokes, RingSpec, RingTopology, Segment, StrokeInstruction};
use crate::stats::composer::{ActiveItemSet, StatRow};
use crate::stats::handlers::{layout_candidates, RenderedStat, StatCandidate};
use crate::style::{CardStyle, FontPreset};
use crate::text_fit::estimator::{fit_text, TextFitRequest, TextFitResult};
use crate::text_fit::metrics::TextMetrics;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Ring dimensions shared by every card in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingStyle {
    pub size: f64,
    pub stroke_width: f64,
    pub gap_degree: f64,
    pub topology: RingTopology,
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            size: 56.0,
            stroke_width: 3.0,
            gap_degree: 16.0,
            topology: RingTopology::Circle,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardInput {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub container_width_px: f32,
    /// Tracked owners, in display order.
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Owner colors without weights. Used only when `segments` is empty; each owner
    /// gets an equal share of the ring.
    #[serde(default)]
    pub owner_colors: Vec<String>,
    #[serde(default)]
    pub stats: Vec<StatCandidate>,
}

impl CardInput {
    pub fn ring_segments(&self) -> Vec<Segment> {
        if self.segments.is_empty() {
            Segment::equal_split(self.owner_colors.iter().cloned())
        } else {
            self.segments.clone()
        }
    }

    pub fn ring_segment_count(&self) -> usize {
        if self.segments.is_empty() {
            self.owner_colors.len()
        } else {
            self.segments.len()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardPreviewRequest {
    #[serde(default)]
    pub style: CardStyle,
    #[serde(default)]
    pub font_preset: FontPreset,
    #[serde(default)]
    pub snap: bool,
    #[serde(default)]
    pub active: ActiveItemSet,
    #[serde(default)]
    pub ring: RingStyle,
    pub cards: Vec<CardInput>,
}

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CardPreview {
    pub id: String,
    pub ring: Vec<StrokeInstruction>,
    pub rows: Vec<StatRow<RenderedStat>>,
    pub name: TextFitResult,
    pub symbol: TextFitResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardPreviewResponse {
    pub request_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub style: CardStyle,
    pub cards: Vec<CardPreview>,
}

// ────────────────────────────────────────────────────────────────────────────
// Preview
// ────────────────────────────────────────────────────────────────────────────

fn text_request(req: &CardPreviewRequest, card: &CardInput, text: &str, symbol: bool) -> TextFitRequest {
    TextFitRequest {
        text: text.to_string(),
        is_symbol_role: symbol,
        container_width_px: card.container_width_px,
        font_preset: req.font_preset,
        style_variant: req.style,
        snap: req.snap,
        explicit_truncate: None,
    }
}

pub fn preview_card(req: &CardPreviewRequest, card: &CardInput, metrics: &TextMetrics) -> CardPreview {
    let ring_spec = RingSpec {
        size: req.ring.size,
        stroke_width: req.ring.stroke_width,
        gap_degree: req.ring.gap_degree,
        topology: req.ring.topology,
        segments: card.ring_segments(),
    };

    CardPreview {
        id: card.id.clone(),
        ring: compute_ring_strokes(&ring_spec),
        rows: layout_candidates(req.style, &card.stats, &req.active),
        name: fit_text(&text_request(req, card, &card.name, false), metrics),
        symbol: fit_text(&text_request(req, card, &card.symbol, true), metrics),
    }
}

/// Synchronous batch preview. Output order matches input order.
pub fn preview_cards(req: &CardPreviewRequest, metrics: &TextMetrics) -> Vec<CardPreview> {
    req.cards
        .iter()
        .map(|card| preview_card(req, card, metrics))
        .collect()
}

/// Runs a batch on the blocking pool.
pub async fn run_preview(
    req: CardPreviewRequest,
    metrics: Arc<TextMetrics>,
) -> Result<CardPreviewResponse, AppError> {
    let request_id = Uuid::new_v4();
    let style = req.style;
    let card_count = req.cards.len();

    let cards = tokio::task::spawn_blocking(move || preview_cards(&req, &metrics))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in card preview: {e}")))?;

    info!(%request_id, cards = card_count, style = style.as_str(), "card preview computed");

    Ok(CardPreviewResponse {
        request_id,
        computed_at: Utc::now(),
        style,
        cards,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
