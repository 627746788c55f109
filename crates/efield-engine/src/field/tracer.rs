//! Fixed-step field-line integration.
//!
//! A line is walked one `step_size` at a time along the normalized field,
//! forward from positive charges and backward from negative ones, so every
//! line runs from positive toward negative. Each call allocates its own point
//! buffer; nothing is shared between traces.

use glam::Vec2;

use crate::api::config::VizConfig;
use crate::core::charge::{Charge, ChargeSet, Polarity};
use crate::core::viewport::Viewport;
use crate::error::{EfieldError, Result};
use crate::field::evaluator::{field, FieldModel};

/// Why a trace stopped. Conditions are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The line holds `max_steps` points.
    StepLimit,
    /// The field at the last point is exactly zero.
    ZeroField,
    /// The last point is outside the viewport.
    LeftViewport,
    /// The last point is inside a charge's exclusion radius.
    ReachedCharge,
}

/// A traced polyline. Lives for one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLine {
    pub points: Vec<Vec2>,
    pub stop: StopReason,
}

impl FieldLine {
    /// Consecutive point pairs, in tracing order.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Euler walker over the field of a charge set.
#[derive(Debug, Clone, Copy)]
pub struct Tracer {
    pub model: FieldModel,
    pub viewport: Viewport,
    pub step_size: f32,
    pub max_steps: usize,
}

impl Tracer {
    pub fn from_config(config: &VizConfig) -> Self {
        Self {
            model: config.field_model(),
            viewport: config.viewport(),
            step_size: config.step_size,
            max_steps: config.max_steps,
        }
    }

    /// Trace from `seed`. The seed is always the first point.
    ///
    /// A seed that already meets a stop condition yields a one-point line.
    /// A NaN or infinite seed is rejected.
    pub fn trace(
        &self,
        seed: Vec2,
        polarity: Polarity,
        charges: &ChargeSet,
    ) -> Result<FieldLine> {
        if !seed.is_finite() {
            return Err(EfieldError::NonFiniteSeed {
                x: seed.x,
                y: seed.y,
            });
        }
        Ok(self.walk(seed, polarity, charges.as_slice()))
    }

    /// The integration loop. `seed` and every charge must be finite.
    pub(crate) fn walk(&self, seed: Vec2, polarity: Polarity, charges: &[Charge]) -> FieldLine {
        let direction = polarity.sign();
        let mut points = Vec::with_capacity(self.max_steps.min(512));
        let mut current = seed;
        points.push(seed);

        let stop = loop {
            if points.len() >= self.max_steps {
                break StopReason::StepLimit;
            }
            let e = field(current, charges, &self.model);
            let magnitude = e.length();
            if magnitude == 0.0 || !magnitude.is_finite() {
                break StopReason::ZeroField;
            }
            if !self.viewport.contains(current) {
                break StopReason::LeftViewport;
            }
            if charges.iter().any(|c| self.model.is_excluded(current, c)) {
                break StopReason::ReachedCharge;
            }

            current += e / magnitude * self.step_size * direction;
            points.push(current);
        };

        FieldLine { points, stop }
    }
}

/// Trace a single field line with the tracer settings from `config`.
pub fn trace_line(
    seed: Vec2,
    polarity: Polarity,
    charges: &ChargeSet,
    config: &VizConfig,
) -> Result<FieldLine> {
    Tracer::from_config(config).trace(seed, polarity, charges)
}
