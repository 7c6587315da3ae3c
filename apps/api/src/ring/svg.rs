//! Standalone SVG rendering of a segmented ring.
//!
//! The circle starts at 12 o'clock (rotated -90°). The square path starts at top-center
//! and runs clockwise so both topologies begin drawing at the same visual point.

use std::fmt::Write;

use crate::ring::geometry::{
    compute_ring_strokes, sanitize, RingSpec, RingTopology, StrokeInstruction,
};

/// Size and stroke width after the same clamping the stroke math applies.
#[derive(Debug, Clone, Copy)]
struct Frame {
    size: f64,
    stroke_width: f64,
}

/// Renders the ring as an `<svg>` document sized `size × size`.
///
/// A degenerate spec yields an empty `<svg>` of the requested size.
pub fn render_ring_svg(spec: &RingSpec) -> String {
    let strokes = compute_ring_strokes(spec);
    let frame = Frame {
        size: sanitize(spec.size),
        stroke_width: sanitize(spec.stroke_width),
    };
    let size = frame.size;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );
    for stroke in &strokes {
        match spec.topology {
            RingTopology::Circle => write_circle(&mut out, frame, stroke),
            RingTopology::Square => write_square(&mut out, frame, stroke),
        }
    }
    out.push_str("</svg>");
    out
}

fn write_circle(out: &mut String, frame: Frame, stroke: &StrokeInstruction) {
    let center = frame.size / 2.0;
    let radius = (frame.size - frame.stroke_width) / 2.0;
    let _ = write!(
        out,
        r#"<circle cx="{center}" cy="{center}" r="{radius}" fill="none" stroke="{color}" stroke-width="{width}" {dash} transform="rotate(-90 {center} {center})"/>"#,
        color = escape_attr(&stroke.color),
        width = frame.stroke_width,
        dash = dash_attrs(stroke),
    );
}

fn write_square(out: &mut String, frame: Frame, stroke: &StrokeInstruction) {
    let inset = frame.stroke_width / 2.0;
    let far = frame.size - inset;
    let center = frame.size / 2.0;
    let _ = write!(
        out,
        r#"<path d="M {center} {inset} H {far} V {far} H {inset} V {inset} Z" fill="none" stroke="{color}" stroke-width="{width}" {dash}/>"#,
        color = escape_attr(&stroke.color),
        width = frame.stroke_width,
        dash = dash_attrs(stroke),
    );
}

fn dash_attrs(stroke: &StrokeInstruction) -> String {
    format!(
        r#"stroke-dasharray="{:.3} {:.3}" stroke-dashoffset="{:.3}""#,
        stroke.dash_array[0], stroke.dash_array[1], stroke.dash_offset
    )
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
