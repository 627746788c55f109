//! Field math: Coulomb superposition and field-line tracing.

pub mod evaluator;
pub mod tracer;

pub use evaluator::{field, potential, FieldModel};
pub use tracer::{trace_line, FieldLine, StopReason, Tracer};
