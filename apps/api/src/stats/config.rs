//! Per-style indicator tables.
//!
//! One static table per `CardStyle`. A key missing from a style's table is never rendered
//! under that style. `visible` is the style-level kill switch, independent of the user's
//! own enabled set. Tables are read-only.

use serde::Serialize;

use crate::style::CardStyle;

// ────────────────────────────────────────────────────────────────────────────
// Indicator keys
// ────────────────────────────────────────────────────────────────────────────

pub const STAR: &str = "star";
pub const HOLDERS: &str = "holders";
pub const PRO_TRADERS: &str = "pro_traders";
pub const TOP10: &str = "top10";
pub const DEV_HOLDING: &str = "dev_holding";
pub const SNIPERS: &str = "snipers";
pub const INSIDERS: &str = "insiders";
pub const BUNDLED: &str = "bundled";
pub const DEX_PAID: &str = "dex_paid";

// ────────────────────────────────────────────────────────────────────────────
// Table types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatItemConfig {
    pub key: &'static str,
    pub visible: bool,
    /// 1-based row. Rows need not be contiguous.
    pub row: u16,
    /// Sort key within the row.
    pub position: i32,
}

const fn item(key: &'static str, visible: bool, row: u16, position: i32) -> StatItemConfig {
    StatItemConfig {
        key,
        visible,
        row,
        position,
    }
}

/// Resolved table for one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleLayout {
    pub style: CardStyle,
    pub items: &'static [StatItemConfig],
    /// Rows emitted trailing-first for this style.
    pub reversed_rows: &'static [u16],
}

impl StyleLayout {
    pub fn entry(&self, key: &str) -> Option<&'static StatItemConfig> {
        let items: &'static [StatItemConfig] = self.items;
        items.iter().find(|item| item.key == key)
    }

    pub fn is_row_reversed(&self, row: u16) -> bool {
        self.reversed_rows.contains(&row)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tables
// ────────────────────────────────────────────────────────────────────────────

// Holders and pro traders share a slot; the user's ordering hint decides between them.
static CLASSIC_ITEMS: [StatItemConfig; 9] = [
    item(STAR, true, 1, 1),
    item(HOLDERS, true, 1, 2),
    item(PRO_TRADERS, true, 1, 2),
    item(TOP10, true, 1, 4),
    item(DEV_HOLDING, true, 2, 1),
    item(SNIPERS, true, 2, 2),
    item(INSIDERS, true, 2, 3),
    item(BUNDLED, true, 2, 4),
    item(DEX_PAID, true, 2, 5),
];

static COMPACT_ITEMS: [StatItemConfig; 9] = [
    item(STAR, true, 1, 1),
    item(TOP10, true, 1, 2),
    item(DEV_HOLDING, true, 1, 3),
    item(SNIPERS, true, 1, 4),
    item(INSIDERS, true, 1, 5),
    item(BUNDLED, true, 1, 6),
    item(HOLDERS, true, 1, 7),
    item(PRO_TRADERS, false, 1, 8),
    item(DEX_PAID, false, 1, 9),
];

// Row 1 is the "base" group, drawn trailing-first.
static DETAILED_ITEMS: [StatItemConfig; 9] = [
    item(TOP10, true, 1, 1),
    item(DEV_HOLDING, true, 1, 2),
    item(SNIPERS, true, 1, 3),
    item(INSIDERS, true, 1, 4),
    item(BUNDLED, true, 1, 5),
    item(HOLDERS, true, 2, 1),
    item(PRO_TRADERS, true, 2, 2),
    item(DEX_PAID, true, 2, 3),
    item(STAR, true, 4, 1),
];

static MINIMAL_ITEMS: [StatItemConfig; 5] = [
    item(STAR, true, 1, 1),
    item(HOLDERS, true, 1, 2),
    item(TOP10, true, 3, 1),
    item(SNIPERS, false, 3, 2),
    item(BUNDLED, false, 3, 3),
];

/// Returns the table for a style. Every style has one; `Classic` is the baseline.
pub fn style_layout(style: CardStyle) -> StyleLayout {
    match style {
        CardStyle::Classic => StyleLayout {
            style,
            items: &CLASSIC_ITEMS,
            reversed_rows: &[],
        },
        CardStyle::Compact => StyleLayout {
            style,
            items: &COMPACT_ITEMS,
            reversed_rows: &[],
        },
        CardStyle::Detailed => StyleLayout {
            style,
            items: &DETAILED_ITEMS,
            reversed_rows: &[1],
        },
        CardStyle::Minimal => StyleLayout {
            style,
            items: &MINIMAL_ITEMS,
            reversed_rows: &[],
        },
    }
}
