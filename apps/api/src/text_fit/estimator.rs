//! Dynamic text-fit estimator: how many characters of a card label fit in its width budget.
//!
//! Two roles:
//! - symbol: capped by the static per-preset table, never sized from width
//! - label (free text): sized from `container_width_px × style fraction ÷ avg glyph width`,
//!   unless the tables give it a static cap
//!
//! All limits count Unicode scalar values and never drop below 1.

use serde::{Deserialize, Serialize};

use crate::style::{CardStyle, FontPreset};
use crate::text_fit::metrics::TextMetrics;

pub const TRUNCATION_MARKER: char = '…';

/// Floor for glyph width so a bad table can never divide by zero.
const MIN_CHAR_WIDTH_PX: f32 = 1.0;

// ────────────────────────────────────────────────────────────────────────────
// Request / result
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFitRequest {
    pub text: String,
    #[serde(default)]
    pub is_symbol_role: bool,
    /// Measured container width. May be stale, zero or negative.
    #[serde(default)]
    pub container_width_px: f32,
    #[serde(default)]
    pub font_preset: FontPreset,
    #[serde(default)]
    pub style_variant: CardStyle,
    /// Companion panel visible and competing for width.
    #[serde(default)]
    pub snap: bool,
    /// Absent: labels truncate to their dynamic limit, symbols only to their static cap.
    #[serde(default)]
    pub explicit_truncate: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFitResult {
    pub display_text: String,
    /// The limit applied, or `None` when the text was returned untouched.
    pub char_budget_used: Option<usize>,
}

// ────────────────────────────────────────────────────────────────────────────
// Estimation
// ────────────────────────────────────────────────────────────────────────────

/// `floor(width × fraction ÷ avg_char_width)`, floored at 1.
///
/// Non-decreasing in `container_width_px` with all other inputs fixed.
pub fn dynamic_char_limit(container_width_px: f32, fraction: f32, avg_char_width_px: f32) -> usize {
    let width = if container_width_px.is_finite() {
        container_width_px
    } else {
        0.0
    };
    if width <= 0.0 {
        return 1;
    }
    let fraction = if fraction.is_finite() { fraction.max(0.0) } else { 0.0 };
    let glyph = if avg_char_width_px.is_finite() {
        avg_char_width_px.max(MIN_CHAR_WIDTH_PX)
    } else {
        MIN_CHAR_WIDTH_PX
    };
    let limit = ((width * fraction) / glyph).floor();
    (limit as usize).max(1)
}

/// Dynamic limit for a request, resolved against the metric tables.
pub fn dynamic_limit_for(req: &TextFitRequest, metrics: &TextMetrics) -> usize {
    dynamic_char_limit(
        req.container_width_px,
        metrics.width_fraction(req.style_variant, req.is_symbol_role, req.snap),
        metrics.avg_char_width(req.font_preset),
    )
}

/// Keeps the first `limit` characters and appends the marker. Idempotent for a fixed limit.
///
/// Text already within the limit is returned as-is. A kept prefix that ends in the marker
/// is not given a second one.
pub fn truncate_to_limit(text: &str, limit: usize) -> String {
    let limit = limit.max(1);
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    while out.ends_with(TRUNCATION_MARKER) {
        out.pop();
    }
    out.push(TRUNCATION_MARKER);
    out
}

/// Decides the display text for one label.
pub fn fit_text(req: &TextFitRequest, metrics: &TextMetrics) -> TextFitResult {
    let static_limit = metrics.static_limit(req.style_variant, req.font_preset, req.is_symbol_role);
    let explicit = req.explicit_truncate.unwrap_or(!req.is_symbol_role);

    if !explicit && static_limit.is_none() {
        return TextFitResult {
            display_text: req.text.clone(),
            char_budget_used: None,
        };
    }

    let limit = static_limit
        .unwrap_or_else(|| dynamic_limit_for(req, metrics))
        .max(1);

    TextFitResult {
        display_text: truncate_to_limit(&req.text, limit),
        char_budget_used: Some(limit),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(text: &str, symbol: bool, width: f32) -> TextFitRequest {
        TextFitRequest {
            text: text.to_string(),
            is_symbol_role: symbol,
            container_width_px: width,
            font_preset: FontPreset::Normal,
            style_variant: CardStyle::Classic,
            snap: false,
            explicit_truncate: None,
        }
    }

    // ── dynamic limit ───────────────────────────────────────────────────────

    #[test]
    fn test_dynamic_limit_basic() {
        // 280px × 0.5 / 7px = 20 chars
        assert_eq!(dynamic_char_limit(280.0, 0.5, 7.0), 20);
    }

    #[test]
    fn test_dynamic_limit_floors_at_one() {
        assert_eq!(dynamic_char_limit(0.0, 0.5, 7.0), 1);
        assert_eq!(dynamic_char_limit(-50.0, 0.5, 7.0), 1);
        assert_eq!(dynamic_char_limit(10.0, 0.02, 7.0), 1);
        assert_eq!(dynamic_char_limit(f32::NAN, 0.5, 7.0), 1);
    }

    #[test]
    fn test_dynamic_limit_survives_bad_glyph_width() {
        assert_eq!(dynamic_char_limit(100.0, 0.5, 0.0), 50);
        assert_eq!(dynamic_char_limit(100.0, 0.5, f32::INFINITY), 50);
    }

    #[test]
    fn test_dynamic_limit_monotonic_in_width() {
        let mut previous = 0;
        for width in (0..2000).map(|w| w as f32 * 0.75) {
            let limit = dynamic_char_limit(width, 0.35, 8.0);
            assert!(limit >= previous, "limit dropped at width {width}");
            previous = limit;
        }
    }

    // ── truncation ──────────────────────────────────────────────────────────

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_to_limit("PEPE", 4), "PEPE");
        assert_eq!(truncate_to_limit("", 3), "");
    }

    #[test]
    fn test_truncate_appends_marker() {
        assert_eq!(truncate_to_limit("SUPERLONGNAME", 4), "SUPE…");
    }

    #[test]
    fn test_truncate_is_idempotent() {
        for limit in 0..15 {
            let once = truncate_to_limit("Token Display Name", limit);
            let twice = truncate_to_limit(&once, limit);
            assert_eq!(once, twice, "not idempotent at limit {limit}");
        }
    }

    #[test]
    fn test_truncate_never_longer_than_original() {
        for limit in 0..20 {
            let out = truncate_to_limit("Wrapped Ether", limit);
            assert!(out.chars().count() <= "Wrapped Ether".chars().count());
        }
    }

    #[test]
    fn test_truncate_zero_limit_keeps_one_char() {
        assert_eq!(truncate_to_limit("Token", 0), "T…");
    }

    #[test]
    fn test_truncate_does_not_double_marker() {
        assert_eq!(truncate_to_limit("AB…CDEF", 3), "AB…");
    }

    #[test]
    fn test_truncate_respects_multibyte_chars() {
        assert_eq!(truncate_to_limit("日本語トークン", 3), "日本語…");
    }

    // ── fit_text ────────────────────────────────────────────────────────────

    #[test]
    fn test_symbol_uses_static_limit_regardless_of_width() {
        let metrics = TextMetrics::default();
        for width in [0.0, 120.0, 4000.0] {
            let mut req = make_request("SUPERLONGNAME", true, width);
            req.font_preset = FontPreset::Doubleextralarge;
            let result = fit_text(&req, &metrics);
            assert_eq!(result.display_text, "SUPE…");
            assert_eq!(result.char_budget_used, Some(4));
        }
    }

    #[test]
    fn test_symbol_unlimited_preset_returns_original() {
        let metrics = TextMetrics::default();
        let result = fit_text(&make_request("SUPERLONGNAME", true, 10.0), &metrics);
        assert_eq!(result.display_text, "SUPERLONGNAME");
        assert_eq!(result.char_budget_used, None);
    }

    #[test]
    fn test_symbol_explicit_truncate_without_static_cap_uses_width() {
        let metrics = TextMetrics::default();
        let mut req = make_request("SUPERLONGNAME", true, 140.0);
        req.explicit_truncate = Some(true);
        // 140 × 0.25 / 7 = 5
        let result = fit_text(&req, &metrics);
        assert_eq!(result.char_budget_used, Some(5));
        assert_eq!(result.display_text, "SUPER…");
    }

    #[test]
    fn test_label_zero_width_clamps_to_one_char() {
        let metrics = TextMetrics::default();
        let result = fit_text(&make_request("Token Display Name", false, 0.0), &metrics);
        assert_eq!(result.display_text, "T…");
        assert_eq!(result.char_budget_used, Some(1));
    }

    #[test]
    fn test_label_fits_in_wide_container() {
        let metrics = TextMetrics::default();
        let result = fit_text(&make_request("Token Display Name", false, 1000.0), &metrics);
        assert_eq!(result.display_text, "Token Display Name");
        assert_eq!(result.char_budget_used, Some(71));
    }

    #[test]
    fn test_label_explicit_false_returns_original() {
        let metrics = TextMetrics::default();
        let mut req = make_request("Token Display Name", false, 0.0);
        req.explicit_truncate = Some(false);
        let result = fit_text(&req, &metrics);
        assert_eq!(result.display_text, "Token Display Name");
        assert_eq!(result.char_budget_used, None);
    }

    #[test]
    fn test_snap_state_reduces_label_budget() {
        let metrics = TextMetrics::default();
        let mut req = make_request("A fairly long token display name", false, 290.0);
        let open = fit_text(&req, &metrics);
        req.snap = true;
        let snapped = fit_text(&req, &metrics);
        assert_eq!(open.char_budget_used, Some(20));
        assert_eq!(snapped.char_budget_used, Some(14));
        assert!(snapped.display_text.chars().count() < open.display_text.chars().count());
    }

    #[test]
    fn test_compact_label_uses_static_cap() {
        let metrics = TextMetrics::default();
        let mut req = make_request("Token Display Name", false, 5000.0);
        req.style_variant = CardStyle::Compact;
        req.explicit_truncate = Some(false);
        let result = fit_text(&req, &metrics);
        assert_eq!(result.char_budget_used, Some(10));
        assert_eq!(result.display_text, "Token Disp…");
    }

    #[test]
    fn test_fit_text_idempotent_on_own_output() {
        let metrics = TextMetrics::default();
        let req = make_request("Token Display Name", false, 180.0);
        let first = fit_text(&req, &metrics);
        let again = fit_text(
            &TextFitRequest {
                text: first.display_text.clone(),
                ..req.clone()
            },
            &metrics,
        );
        assert_eq!(first, again);
    }
}
