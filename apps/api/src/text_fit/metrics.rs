//! Text-fit constant tables: average glyph widths, static truncation caps, and
//! per-style width fractions.
//!
//! These are empirically tuned presentation constants. The built-in defaults can be
//! replaced wholesale per top-level field by a JSON file (`TEXT_METRICS_PATH`) without
//! touching the estimator.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::style::{CardStyle, FontPreset};

// ────────────────────────────────────────────────────────────────────────────
// Table shapes
// ────────────────────────────────────────────────────────────────────────────

/// One value per font preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresetTable<T> {
    pub normal: T,
    pub large: T,
    pub extralarge: T,
    pub doubleextralarge: T,
}

impl<T: Copy> PresetTable<T> {
    pub fn get(&self, preset: FontPreset) -> T {
        match preset {
            FontPreset::Normal => self.normal,
            FontPreset::Large => self.large,
            FontPreset::Extralarge => self.extralarge,
            FontPreset::Doubleextralarge => self.doubleextralarge,
        }
    }
}

/// How much of the container a style gives to its text roles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleFit {
    /// Fraction of container width for the free-text label.
    pub label_fraction: f32,
    /// Label fraction while a companion panel is open (snap state).
    pub snap_label_fraction: f32,
    /// Fraction used for symbols when truncation is forced and no static cap exists.
    pub symbol_fraction: f32,
    /// Static label cap for styles that do not size labels from width.
    #[serde(default)]
    pub label_cap: Option<usize>,
}

/// One value per card style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleTable<T> {
    pub classic: T,
    pub compact: T,
    pub detailed: T,
    pub minimal: T,
}

impl<T: Copy> StyleTable<T> {
    pub fn get(&self, style: CardStyle) -> T {
        match style {
            CardStyle::Classic => self.classic,
            CardStyle::Compact => self.compact,
            CardStyle::Detailed => self.detailed,
            CardStyle::Minimal => self.minimal,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metrics
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    /// Average glyph width in pixels. Larger presets are wider.
    pub avg_char_width_px: PresetTable<f32>,
    /// Absolute caps for symbol text. `None` means unlimited.
    pub symbol_limits: PresetTable<Option<usize>>,
    /// Absolute caps for free-text labels. `None` means sized from width.
    pub label_limits: PresetTable<Option<usize>>,
    pub styles: StyleTable<StyleFit>,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            avg_char_width_px: PresetTable {
                normal: 7.0,
                large: 8.0,
                extralarge: 9.0,
                doubleextralarge: 10.5,
            },
            symbol_limits: PresetTable {
                normal: None,
                large: None,
                extralarge: Some(6),
                doubleextralarge: Some(4),
            },
            label_limits: PresetTable {
                normal: None,
                large: None,
                extralarge: None,
                doubleextralarge: None,
            },
            styles: StyleTable {
                classic: StyleFit {
                    label_fraction: 0.5,
                    snap_label_fraction: 0.35,
                    symbol_fraction: 0.25,
                    label_cap: None,
                },
                compact: StyleFit {
                    label_fraction: 0.02,
                    snap_label_fraction: 0.015,
                    symbol_fraction: 0.1,
                    label_cap: Some(10),
                },
                detailed: StyleFit {
                    label_fraction: 0.6,
                    snap_label_fraction: 0.42,
                    symbol_fraction: 0.3,
                    label_cap: None,
                },
                minimal: StyleFit {
                    label_fraction: 0.45,
                    snap_label_fraction: 0.3,
                    symbol_fraction: 0.2,
                    label_cap: None,
                },
            },
        }
    }
}

impl TextMetrics {
    /// Loads tables from a JSON file. Fields missing from the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read text metrics from {}", path.display()))?;
        let metrics: TextMetrics = serde_json::from_str(&raw)
            .with_context(|| format!("invalid text metrics JSON in {}", path.display()))?;
        metrics.validate()?;
        info!("Loaded text metrics from {}", path.display());
        Ok(metrics)
    }

    /// Rejects tables the estimator cannot use meaningfully.
    pub fn validate(&self) -> Result<()> {
        for preset in FontPreset::ALL {
            let width = self.avg_char_width_px.get(preset);
            if !width.is_finite() || width <= 0.0 {
                bail!("avg_char_width_px for {preset:?} must be positive, got {width}");
            }
        }
        for style in CardStyle::ALL {
            let fit = self.styles.get(style);
            for (name, fraction) in [
                ("label_fraction", fit.label_fraction),
                ("snap_label_fraction", fit.snap_label_fraction),
                ("symbol_fraction", fit.symbol_fraction),
            ] {
                if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
                    bail!("{name} for {} must be within 0..=1, got {fraction}", style.as_str());
                }
            }
        }
        Ok(())
    }

    pub fn avg_char_width(&self, preset: FontPreset) -> f32 {
        self.avg_char_width_px.get(preset)
    }

    /// Static cap for a role, if the tables define one.
    pub fn static_limit(&self, style: CardStyle, preset: FontPreset, symbol: bool) -> Option<usize> {
        if symbol {
            self.symbol_limits.get(preset)
        } else {
            self.label_limits
                .get(preset)
                .or(self.styles.get(style).label_cap)
        }
    }

    /// Share of the container width allotted to a text role.
    pub fn width_fraction(&self, style: CardStyle, symbol: bool, snap: bool) -> f32 {
        let fit = self.styles.get(style);
        match (symbol, snap) {
            (true, _) => fit.symbol_fraction,
            (false, false) => fit.label_fraction,
            (false, true) => fit.snap_label_fraction,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
