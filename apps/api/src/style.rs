//! Card style variants and font presets shared by the layout composer and the text-fit estimator.
//!
//! Both enums arrive from the user-preference snapshot as plain strings. Parsing never
//! fails: an unrecognized style resolves to the baseline `Classic` table.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Card style
// ────────────────────────────────────────────────────────────────────────────

/// A named visual layout mode for a token card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStyle {
    /// Baseline table. Also the fallback for unknown style names.
    #[default]
    Classic,
    /// Single dense row; free-text labels rely on a static cap instead of width.
    Compact,
    /// Two stat rows with the base group drawn trailing-first.
    Detailed,
    /// Few indicators, generous spacing.
    Minimal,
}

impl CardStyle {
    pub const ALL: [CardStyle; 4] = [
        CardStyle::Classic,
        CardStyle::Compact,
        CardStyle::Detailed,
        CardStyle::Minimal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CardStyle::Classic => "classic",
            CardStyle::Compact => "compact",
            CardStyle::Detailed => "detailed",
            CardStyle::Minimal => "minimal",
        }
    }

    /// Resolves a style name, case-insensitively. Unknown names fall back to `Classic`.
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .unwrap_or_else(|| {
                warn!(style = %name, "unknown card style, falling back to classic");
                CardStyle::Classic
            })
    }
}

impl<'de> Deserialize<'de> for CardStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(CardStyle::from_name(&name))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font preset
// ────────────────────────────────────────────────────────────────────────────

/// Text-size tier chosen by the user. Controls glyph width and static symbol caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontPreset {
    #[default]
    Normal,
    Large,
    #[serde(alias = "extra_large")]
    Extralarge,
    #[serde(alias = "double_extra_large")]
    Doubleextralarge,
}

impl FontPreset {
    pub const ALL: [FontPreset; 4] = [
        FontPreset::Normal,
        FontPreset::Large,
        FontPreset::Extralarge,
        FontPreset::Doubleextralarge,
    ];
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
