//! Segmented ring geometry: turns owner proportions into dash-array stroke instructions.
//!
//! Circle and square rings share the same segment math. Only the perimeter differs:
//! - circle: stroke drawn on a circle of diameter `size - stroke_width`
//! - square: stroke drawn on a square path inset by half the stroke width
//!
//! Each segment becomes a two-element repeating dash pattern `[drawn, perimeter - drawn]`
//! plus an offset that rotates its drawn run to start right after the previous segment's gap.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ────────────────────────────────────────────────────────────────────────────
// Input types
// ────────────────────────────────────────────────────────────────────────────

/// One colored, proportionally-sized run of the ring. Order is rendering order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Proportion, usually summing to 100 across the ring (not required).
    pub value: f64,
    /// Color token passed through untouched to the stroke instruction.
    pub color: String,
}

impl Segment {
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }

    /// Builds one equally-weighted segment per color, each worth `100 / n`.
    pub fn equal_split<I, S>(colors: I) -> Vec<Segment>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Vec::new();
        }
        let share = 100.0 / colors.len() as f64;
        colors
            .into_iter()
            .map(|color| Segment::new(share, color))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingTopology {
    #[default]
    Circle,
    Square,
}

/// Full description of one ring around an avatar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSpec {
    /// Outer size of the ring in pixels.
    pub size: f64,
    pub stroke_width: f64,
    /// Gap trailing each segment, in degrees of the full perimeter.
    #[serde(default)]
    pub gap_degree: f64,
    #[serde(default)]
    pub topology: RingTopology,
    pub segments: Vec<Segment>,
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Drawing instruction for a single segment, ready for `stroke-dasharray`/`stroke-dashoffset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeInstruction {
    pub color: String,
    /// `[drawn, perimeter - drawn]`.
    pub dash_array: [f64; 2],
    pub dash_offset: f64,
}

#[cfg(test)]
impl StrokeInstruction {
    pub fn drawn_length(&self) -> f64 {
        self.dash_array[0]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// Non-finite and negative inputs collapse to zero.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Total stroke path length for the given topology. Zero when the stroke eats the ring.
pub fn ring_perimeter(size: f64, stroke_width: f64, topology: RingTopology) -> f64 {
    let inner = sanitize(size) - sanitize(stroke_width);
    if inner <= 0.0 {
        return 0.0;
    }
    match topology {
        RingTopology::Circle => 2.0 * PI * (inner / 2.0),
        RingTopology::Square => 4.0 * inner,
    }
}

/// Length of the gap trailing each segment. Always zero for a ring of 0 or 1 segments.
pub fn gap_length(spec: &RingSpec) -> f64 {
    if spec.segments.len() <= 1 {
        return 0.0;
    }
    let perimeter = ring_perimeter(spec.size, spec.stroke_width, spec.topology);
    (sanitize(spec.gap_degree) / 360.0) * perimeter
}

/// Computes one stroke instruction per segment, in input order.
///
/// Returns an empty list when nothing can be drawn: non-positive perimeter,
/// non-positive total value, or gaps that consume the entire perimeter.
pub fn compute_ring_strokes(spec: &RingSpec) -> Vec<StrokeInstruction> {
    let perimeter = ring_perimeter(spec.size, spec.stroke_width, spec.topology);
    let total_value: f64 = spec.segments.iter().map(|s| sanitize(s.value)).sum();

    if perimeter <= 0.0 || total_value <= 0.0 {
        debug!(
            perimeter,
            total_value,
            segments = spec.segments.len(),
            "degenerate ring geometry, nothing to draw"
        );
        return Vec::new();
    }

    let gap = gap_length(spec);
    let effective_perimeter = perimeter - gap * spec.segments.len() as f64;
    if effective_perimeter <= 0.0 {
        debug!(perimeter, gap, "ring gaps consume the whole perimeter");
        return Vec::new();
    }

    let length_per_unit = effective_perimeter / total_value;
    let mut drawn_so_far = 0.0_f64;

    spec.segments
        .iter()
        .map(|segment| {
            let segment_length = sanitize(segment.value) * length_per_unit;
            let instruction = StrokeInstruction {
                color: segment.color.clone(),
                dash_array: [segment_length, (perimeter - segment_length).max(0.0)],
                dash_offset: perimeter - drawn_so_far,
            };
            drawn_so_far += segment_length + gap;
            instruction
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn make_spec(values: &[f64], gap_degree: f64, topology: RingTopology) -> RingSpec {
        RingSpec {
            size: 56.0,
            stroke_width: 3.0,
            gap_degree,
            topology,
            segments: values
                .iter()
                .enumerate()
                .map(|(i, v)| Segment::new(*v, format!("owner-{i}")))
                .collect(),
        }
    }

    fn assert_finite(strokes: &[StrokeInstruction]) {
        for s in strokes {
            assert!(s.dash_array[0].is_finite() && s.dash_array[1].is_finite());
            assert!(s.dash_offset.is_finite());
        }
    }

    // ── perimeter ───────────────────────────────────────────────────────────

    #[test]
    fn test_circle_perimeter_uses_inset_diameter() {
        let p = ring_perimeter(56.0, 3.0, RingTopology::Circle);
        assert!((p - 2.0 * PI * 26.5).abs() < EPS);
        assert!((p - 166.5).abs() < 0.1, "expected ~166.5, got {p}");
    }

    #[test]
    fn test_square_perimeter_uses_inset_side() {
        let p = ring_perimeter(56.0, 3.0, RingTopology::Square);
        assert!((p - 212.0).abs() < EPS);
    }

    #[test]
    fn test_perimeter_zero_when_stroke_not_smaller_than_size() {
        assert_eq!(ring_perimeter(10.0, 10.0, RingTopology::Circle), 0.0);
        assert_eq!(ring_perimeter(10.0, 12.0, RingTopology::Square), 0.0);
    }

    // ── strokes ─────────────────────────────────────────────────────────────

    #[test]
    fn test_three_equal_segments_circle() {
        let spec = make_spec(&[33.33, 33.33, 33.33], 16.0, RingTopology::Circle);
        let strokes = compute_ring_strokes(&spec);
        assert_eq!(strokes.len(), 3);

        let perimeter = ring_perimeter(56.0, 3.0, RingTopology::Circle);
        let gap = gap_length(&spec);
        assert!((gap - 16.0 / 360.0 * perimeter).abs() < EPS);

        let first = strokes[0].drawn_length();
        for s in &strokes {
            assert!((s.drawn_length() - first).abs() < EPS);
            assert!((s.dash_array[0] + s.dash_array[1] - perimeter).abs() < EPS);
        }

        let drawn: f64 = strokes.iter().map(|s| s.drawn_length()).sum();
        assert!((drawn + gap * 3.0 - perimeter).abs() < EPS);
    }

    #[test]
    fn test_single_segment_ignores_gap() {
        let spec = make_spec(&[100.0], 16.0, RingTopology::Circle);
        let strokes = compute_ring_strokes(&spec);
        assert_eq!(strokes.len(), 1);
        assert_eq!(gap_length(&spec), 0.0);

        let perimeter = ring_perimeter(56.0, 3.0, RingTopology::Circle);
        assert!((strokes[0].drawn_length() - perimeter).abs() < EPS);
        assert!(strokes[0].dash_array[1].abs() < EPS);
    }

    #[test]
    fn test_offsets_advance_by_drawn_plus_gap() {
        let spec = make_spec(&[50.0, 30.0, 20.0], 10.0, RingTopology::Square);
        let strokes = compute_ring_strokes(&spec);
        let perimeter = ring_perimeter(56.0, 3.0, RingTopology::Square);
        let gap = gap_length(&spec);

        assert!((strokes[0].dash_offset - perimeter).abs() < EPS);
        let expected_second = perimeter - (strokes[0].drawn_length() + gap);
        assert!((strokes[1].dash_offset - expected_second).abs() < EPS);
        let expected_third =
            expected_second - (strokes[1].drawn_length() + gap);
        assert!((strokes[2].dash_offset - expected_third).abs() < EPS);
    }

    #[test]
    fn test_order_preserved_not_sorted_by_value() {
        let spec = make_spec(&[10.0, 70.0, 20.0], 4.0, RingTopology::Circle);
        let strokes = compute_ring_strokes(&spec);
        let colors: Vec<&str> = strokes.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["owner-0", "owner-1", "owner-2"]);
        assert!(strokes[1].drawn_length() > strokes[2].drawn_length());
        assert!(strokes[2].drawn_length() > strokes[0].drawn_length());
    }

    #[test]
    fn test_perimeter_conserved_for_unnormalized_values() {
        let spec = make_spec(&[3.0, 1.0, 7.5, 0.5], 12.0, RingTopology::Square);
        let strokes = compute_ring_strokes(&spec);
        let perimeter = ring_perimeter(56.0, 3.0, RingTopology::Square);
        let total: f64 = strokes.iter().map(|s| s.drawn_length()).sum::<f64>()
            + gap_length(&spec) * strokes.len() as f64;
        assert!((total - perimeter).abs() < 1e-9 * perimeter.max(1.0));
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let spec = make_spec(&[20.0, 40.0, 40.0], 8.0, RingTopology::Circle);
        assert_eq!(compute_ring_strokes(&spec), compute_ring_strokes(&spec));
    }

    // ── degenerate input ────────────────────────────────────────────────────

    #[test]
    fn test_zero_total_value_draws_nothing() {
        let spec = make_spec(&[0.0, 0.0], 16.0, RingTopology::Circle);
        assert!(compute_ring_strokes(&spec).is_empty());
    }

    #[test]
    fn test_empty_segments_draws_nothing() {
        let spec = make_spec(&[], 16.0, RingTopology::Circle);
        assert!(compute_ring_strokes(&spec).is_empty());
    }

    #[test]
    fn test_stroke_wider_than_size_draws_nothing() {
        let mut spec = make_spec(&[50.0, 50.0], 16.0, RingTopology::Circle);
        spec.stroke_width = 60.0;
        assert!(compute_ring_strokes(&spec).is_empty());
    }

    #[test]
    fn test_gaps_consuming_perimeter_draws_nothing() {
        let spec = make_spec(&[50.0, 50.0], 180.0, RingTopology::Circle);
        assert!(compute_ring_strokes(&spec).is_empty());
    }

    #[test]
    fn test_negative_and_nan_inputs_are_clamped() {
        let mut spec = make_spec(&[-20.0, 60.0, f64::NAN], -5.0, RingTopology::Circle);
        spec.stroke_width = -3.0;
        let strokes = compute_ring_strokes(&spec);
        assert_eq!(strokes.len(), 3);
        assert_finite(&strokes);
        assert_eq!(strokes[0].drawn_length(), 0.0);
        assert_eq!(strokes[2].drawn_length(), 0.0);

        let perimeter = ring_perimeter(56.0, 0.0, RingTopology::Circle);
        assert!((strokes[1].drawn_length() - perimeter).abs() < EPS);
    }

    #[test]
    fn test_equal_split_builds_even_shares() {
        let segments = Segment::equal_split(["#f00", "#0f0", "#00f", "#ff0"]);
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| (s.value - 25.0).abs() < EPS));
        assert!(Segment::equal_split(Vec::<String>::new()).is_empty());
    }
}
