use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::state::AppState;
use crate::text_fit::estimator::{fit_text, TextFitRequest, TextFitResult};

/// Card labels are short; anything longer is a malformed request.
pub const MAX_TEXT_CHARS: usize = 1024;

pub fn validate_text(text: &str) -> Result<(), AppError> {
    if text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "text exceeds {MAX_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

/// POST /api/v1/text/fit
pub async fn handle_fit_text(
    State(state): State<AppState>,
    Json(req): Json<TextFitRequest>,
) -> Result<Json<TextFitResult>, AppError> {
    validate_text(&req.text)?;
    Ok(Json(fit_text(&req, &state.text_metrics)))
}
