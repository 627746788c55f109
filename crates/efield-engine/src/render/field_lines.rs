//! Field lines seeded around every charge, drawn as segmented arrows.

use std::f32::consts::{FRAC_PI_6, TAU};

use glam::Vec2;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::canvas::{Arrowhead, Canvas};
use super::color::Color;
use crate::api::config::VizConfig;
use crate::core::charge::{ChargeSet, Polarity};
use crate::field::tracer::{FieldLine, Tracer};

/// `count` points evenly spaced on a circle of `radius` around `center`,
/// starting at angle 0 and turning toward +y.
pub fn seed_points(center: Vec2, count: usize, radius: f32) -> impl Iterator<Item = Vec2> {
    (0..count).map(move |i| {
        let angle = i as f32 / count as f32 * TAU;
        center + Vec2::from_angle(angle) * radius
    })
}

/// Arrowhead at `to` for the segment `from -> to`.
///
/// The two strokes sweep back `head_len` pixels at ±30° from the segment.
pub fn arrowhead(from: Vec2, to: Vec2, head_len: f32) -> Arrowhead {
    let d = to - from;
    let angle = d.y.atan2(d.x);
    Arrowhead {
        tip: to,
        left: to - Vec2::from_angle(angle - FRAC_PI_6) * head_len,
        right: to - Vec2::from_angle(angle + FRAC_PI_6) * head_len,
    }
}

/// Trace every field line for the charge set, in charge order then seed order.
pub fn trace_all(charges: &ChargeSet, config: &VizConfig) -> Vec<FieldLine> {
    let tracer = Tracer::from_config(config);
    let seed_radius = config.charge_radius + config.seed_offset;
    let seeds: Vec<(Vec2, Polarity)> = charges
        .iter()
        .flat_map(|c| {
            seed_points(c.pos, config.lines_per_charge, seed_radius).map(move |p| (p, c.polarity))
        })
        .collect();

    #[cfg(feature = "parallel")]
    let lines = seeds
        .par_iter()
        .map(|&(seed, polarity)| tracer.walk(seed, polarity, charges.as_slice()))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let lines = seeds
        .iter()
        .map(|&(seed, polarity)| tracer.walk(seed, polarity, charges.as_slice()))
        .collect();

    lines
}

/// Trace and draw all field lines. Returns the number of lines drawn.
///
/// Every `arrow_stride`-th segment, starting with the first, also gets an
/// arrowhead at its end point.
pub fn render_field_lines(
    charges: &ChargeSet,
    config: &VizConfig,
    canvas: &mut impl Canvas,
) -> usize {
    let lines = trace_all(charges, config);
    let stride = config.arrow_stride.max(1);

    for line in &lines {
        for (j, (a, b)) in line.segments().enumerate() {
            canvas.stroke_segment(a, b, config.line_width, Color::FIELD_LINE);
            if j % stride == 0 {
                let head = arrowhead(a, b, config.arrow_head_len);
                canvas.stroke_arrowhead(&head, config.line_width, Color::FIELD_LINE);
            }
        }
    }

    log::debug!("drew {} field lines for {} charges", lines.len(), charges.len());
    lines.len()
}
