use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::stats::composer::{compose_layout, ActiveItemSet, RenderRegistry, StatRow};
use crate::stats::config::{style_layout, StyleLayout};
use crate::style::CardStyle;

/// Upper bound on candidate indicators in a single layout request.
pub const MAX_CANDIDATES: usize = 64;

/// An indicator offered by the caller. A candidate without a label has no renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct StatCandidate {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedStat {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub style: CardStyle,
    pub candidates: Vec<StatCandidate>,
    #[serde(default)]
    pub active: ActiveItemSet,
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub style: CardStyle,
    pub rows: Vec<StatRow<RenderedStat>>,
}

/// Registers one label renderer per labelled candidate.
pub fn label_registry(candidates: &[StatCandidate]) -> RenderRegistry<RenderedStat> {
    let mut registry = RenderRegistry::new();
    for candidate in candidates {
        if let Some(label) = &candidate.label {
            let label = label.clone();
            registry.register(candidate.key.clone(), move |key: &str| RenderedStat {
                key: key.to_string(),
                label: label.clone(),
            });
        }
    }
    registry
}

/// Lays out labelled candidates for one card.
pub fn layout_candidates(
    style: CardStyle,
    candidates: &[StatCandidate],
    active: &ActiveItemSet,
) -> Vec<StatRow<RenderedStat>> {
    let registry = label_registry(candidates);
    let keys: Vec<&str> = candidates.iter().map(|c| c.key.as_str()).collect();
    compose_layout(style, &keys, active, &registry)
}

/// POST /api/v1/stats/layout
pub async fn handle_compose_layout(
    Json(req): Json<LayoutRequest>,
) -> Result<Json<LayoutResponse>, AppError> {
    if req.candidates.len() > MAX_CANDIDATES {
        return Err(AppError::Validation(format!(
            "{} candidates supplied, at most {MAX_CANDIDATES} are allowed",
            req.candidates.len()
        )));
    }
    let rows = layout_candidates(req.style, &req.candidates, &req.active);
    Ok(Json(LayoutResponse {
        style: req.style,
        rows,
    }))
}

/// GET /api/v1/stats/styles/:style
/// Unknown style names resolve to the baseline table.
pub async fn handle_get_style(Path(style): Path<String>) -> Json<StyleLayout> {
    Json(style_layout(CardStyle::from_name(&style)))
}
