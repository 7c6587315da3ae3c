//! Stat layout composer. Decides which indicators render on a card and in what order.
//!
//! An item is placed iff all of the following hold:
//! - the style's table has an entry for its key
//! - that entry is `visible` (style-level kill switch)
//! - the user's `ActiveItemSet` enables it
//!
//! Placed items are grouped by `row` (ascending) and ordered by `position` within a row,
//! then by the user's ordering hint, then by key. The composer never draws anything itself;
//! it hands each placed key to a caller-supplied `StatRenderer`.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::stats::config::{style_layout, StatItemConfig, StyleLayout};
use crate::style::CardStyle;

// ────────────────────────────────────────────────────────────────────────────
// User preference snapshot
// ────────────────────────────────────────────────────────────────────────────

/// Per-key user choice: enabled flag plus an optional relative ordering hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ActiveItemRepr")]
pub struct ActiveItem {
    pub enabled: bool,
    pub order: Option<i32>,
}

/// Accepts either `true`/`false` or `{"enabled": .., "order": ..}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ActiveItemRepr {
    Flag(bool),
    Full {
        enabled: bool,
        #[serde(default)]
        order: Option<i32>,
    },
}

impl From<ActiveItemRepr> for ActiveItem {
    fn from(repr: ActiveItemRepr) -> Self {
        match repr {
            ActiveItemRepr::Flag(enabled) => ActiveItem {
                enabled,
                order: None,
            },
            ActiveItemRepr::Full { enabled, order } => ActiveItem { enabled, order },
        }
    }
}

/// Snapshot of which indicator keys the user has enabled. Keys absent from the set are disabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveItemSet {
    items: HashMap<String, ActiveItem>,
}

impl ActiveItemSet {
    pub fn is_enabled(&self, key: &str) -> bool {
        self.items.get(key).is_some_and(|item| item.enabled)
    }

    pub fn order_hint(&self, key: &str) -> Option<i32> {
        self.items.get(key).and_then(|item| item.order)
    }
}

#[cfg(test)]
impl ActiveItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(key, enabled)` pairs without ordering hints.
    pub fn from_flags<I, K>(flags: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        Self {
            items: flags
                .into_iter()
                .map(|(key, enabled)| {
                    (
                        key.into(),
                        ActiveItem {
                            enabled,
                            order: None,
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, enabled: bool, order: Option<i32>) -> Self {
        self.items.insert(key.into(), ActiveItem { enabled, order });
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering seam
// ────────────────────────────────────────────────────────────────────────────

/// Produces the visual element for an indicator key. `None` means no renderer is registered.
pub trait StatRenderer {
    type Output;

    fn render(&self, key: &str) -> Option<Self::Output>;
}

type RenderFn<T> = Box<dyn Fn(&str) -> T + Send + Sync>;

/// Map of per-key render functions, registered by the card-assembly layer.
pub struct RenderRegistry<T> {
    renderers: HashMap<String, RenderFn<T>>,
}

impl<T> RenderRegistry<T> {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, key: impl Into<String>, render: F) -> &mut Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        self.renderers.insert(key.into(), Box::new(render));
        self
    }
}

impl<T> Default for RenderRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StatRenderer for RenderRegistry<T> {
    type Output = T;

    fn render(&self, key: &str) -> Option<T> {
        self.renderers.get(key).map(|render| render(key))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// One non-empty row of rendered indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow<T> {
    pub row: u16,
    pub items: Vec<T>,
}

struct Placement<'a> {
    key: &'a str,
    config: &'static StatItemConfig,
    hint: Option<i32>,
}

/// Composes the indicator rows for one card.
///
/// Duplicate candidate keys are placed once. Keys without a table entry, hidden by the
/// style, disabled by the user, or lacking a renderer are dropped silently. Empty rows
/// are omitted.
pub fn compose_layout<R: StatRenderer>(
    style: CardStyle,
    candidates: &[&str],
    active: &ActiveItemSet,
    renderer: &R,
) -> Vec<StatRow<R::Output>> {
    compose_with_layout(&style_layout(style), candidates, active, renderer)
}

/// Same as [`compose_layout`] against an explicit table.
///
/// Items sharing a `position` in one row are ordered by the user's hint (hinted first,
/// ascending), then by key.
pub fn compose_with_layout<R: StatRenderer>(
    layout: &StyleLayout,
    candidates: &[&str],
    active: &ActiveItemSet,
    renderer: &R,
) -> Vec<StatRow<R::Output>> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    let mut placed: Vec<Placement<'_>> = Vec::with_capacity(candidates.len());

    for &key in candidates {
        if !seen.insert(key) {
            continue;
        }
        let Some(config) = layout.entry(key) else {
            debug!(key, style = layout.style.as_str(), "stat key has no entry for style");
            continue;
        };
        if !config.visible || !active.is_enabled(key) {
            continue;
        }
        placed.push(Placement {
            key,
            config,
            hint: active.order_hint(key),
        });
    }

    placed.sort_by(|a, b| {
        a.config
            .row
            .cmp(&b.config.row)
            .then(a.config.position.cmp(&b.config.position))
            .then(a.hint.is_none().cmp(&b.hint.is_none()))
            .then(a.hint.cmp(&b.hint))
            .then(a.key.cmp(b.key))
    });

    let mut rows: Vec<StatRow<R::Output>> = Vec::new();
    let mut start = 0;
    while start < placed.len() {
        let row = placed[start].config.row;
        let end = placed[start..]
            .iter()
            .position(|p| p.config.row != row)
            .map_or(placed.len(), |offset| start + offset);

        let mut items: Vec<R::Output> = placed[start..end]
            .iter()
            .filter_map(|p| {
                let rendered = renderer.render(p.key);
                if rendered.is_none() {
                    warn!(key = p.key, "no renderer registered for stat key");
                }
                rendered
            })
            .collect();

        if layout.is_row_reversed(row) {
            items.reverse();
        }
        if !items.is_empty() {
            rows.push(StatRow { row, items });
        }
        start = end;
    }

    rows
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
