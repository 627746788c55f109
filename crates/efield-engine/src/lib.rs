//! Headless 2D electrostatics engine.
//!
//! Computes Coulomb fields and potentials by superposition, traces field
//! lines, and turns a charge set into drawing calls on a host-supplied
//! [`Canvas`]: a potential heat map, arrowed field lines, then charge markers.

pub mod api;
pub mod core;
pub mod error;
pub mod field;
pub mod render;

pub use glam;

// Re-export key types at crate root for convenience
pub use crate::api::config::VizConfig;
pub use crate::core::charge::{Charge, ChargeSet, Polarity};
pub use crate::core::viewport::Viewport;
pub use crate::error::{EfieldError, Result};
pub use crate::field::evaluator::{field, potential, FieldModel};
pub use crate::field::tracer::{trace_line, FieldLine, StopReason, Tracer};
pub use crate::render::canvas::{Arrowhead, Canvas, CommandList, DrawCommand};
pub use crate::render::color::Color;
pub use crate::render::field_lines::{arrowhead, render_field_lines, seed_points, trace_all};
pub use crate::render::potential_map::{render_potential_map, PotentialMap};
pub use crate::render::scene::{compose_scene, draw_charge, FrameStats};

#[cfg(feature = "vectors")]
pub use crate::render::vector::{VectorCanvas, VectorVertex};
