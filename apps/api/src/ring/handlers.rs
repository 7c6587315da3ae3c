use axum::{http::header, response::IntoResponse, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::ring::geometry::{compute_ring_strokes, ring_perimeter, RingSpec, StrokeInstruction};
use crate::ring::svg::render_ring_svg;

/// Upper bound on segments accepted over HTTP. Cards track far fewer owners.
pub const MAX_RING_SEGMENTS: usize = 64;

#[derive(Serialize)]
pub struct RingStrokesResponse {
    pub perimeter: f64,
    pub strokes: Vec<StrokeInstruction>,
}

pub fn validate_ring_spec(spec: &RingSpec) -> Result<(), AppError> {
    if spec.segments.len() > MAX_RING_SEGMENTS {
        return Err(AppError::Validation(format!(
            "ring has {} segments, at most {MAX_RING_SEGMENTS} are allowed",
            spec.segments.len()
        )));
    }
    Ok(())
}

/// POST /api/v1/ring/strokes
pub async fn handle_ring_strokes(
    Json(spec): Json<RingSpec>,
) -> Result<Json<RingStrokesResponse>, AppError> {
    validate_ring_spec(&spec)?;
    Ok(Json(RingStrokesResponse {
        perimeter: ring_perimeter(spec.size, spec.stroke_width, spec.topology),
        strokes: compute_ring_strokes(&spec),
    }))
}

/// POST /api/v1/ring/svg
pub async fn handle_ring_svg(Json(spec): Json<RingSpec>) -> Result<impl IntoResponse, AppError> {
    validate_ring_spec(&spec)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], render_ring_svg(&spec)))
}
