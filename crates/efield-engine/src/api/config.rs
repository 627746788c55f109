use serde::{Deserialize, Serialize};

use crate::core::viewport::Viewport;
use crate::error::{EfieldError, Result};
use crate::field::evaluator::FieldModel;

/// Tunables for one visualizer instance, provided by the host.
///
/// Every field falls back to its default when absent from JSON, so a host can
/// send `{}` or only the values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Viewport width in pixels (default: 600).
    pub width: u32,
    /// Viewport height in pixels (default: 400).
    pub height: u32,
    /// Visual radius of a charge marker. Doubles as the exclusion radius
    /// inside which a charge contributes no field or potential (default: 10).
    pub charge_radius: f32,
    /// Coulomb's constant k (default: 8.99e9).
    pub coulomb_constant: f32,
    /// Magnitude q shared by every charge (default: 1 nC).
    pub charge_value: f32,
    /// Tracer step length in pixels (default: 2).
    pub step_size: f32,
    /// Maximum number of points in a traced field line (default: 500).
    pub max_steps: usize,
    /// Field lines seeded around each charge (default: 8).
    pub lines_per_charge: usize,
    /// Gap between the charge marker and the seed circle (default: 1).
    pub seed_offset: f32,
    /// An arrowhead is drawn on every n-th segment (default: 10).
    pub arrow_stride: usize,
    /// Length of each arrowhead stroke in pixels (default: 10).
    pub arrow_head_len: f32,
    /// Stroke width for field lines (default: 1).
    pub line_width: f32,
    /// Alpha channel of the potential map, 0-255 (default: 64).
    pub map_alpha: u8,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            charge_radius: 10.0,
            coulomb_constant: 8.99e9,
            charge_value: 1e-9,
            step_size: 2.0,
            max_steps: 500,
            lines_per_charge: 8,
            seed_offset: 1.0,
            arrow_stride: 10,
            arrow_head_len: 10.0,
            line_width: 1.0,
            map_alpha: 64,
        }
    }
}

impl VizConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply a partial JSON object over this config and validate the result.
    ///
    /// Fields absent from `json` keep their current values rather than the
    /// defaults. `self` is untouched on error.
    pub fn merge_json(&self, json: &str) -> Result<Self> {
        let patch: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(patch);
        }
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make tracing or rendering meaningless.
    pub fn validate(&self) -> Result<()> {
        Viewport::new(self.width, self.height)?;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.charge_radius) {
            return Err(EfieldError::InvalidConfig("charge_radius"));
        }
        if !positive(self.coulomb_constant) {
            return Err(EfieldError::InvalidConfig("coulomb_constant"));
        }
        if !positive(self.charge_value) {
            return Err(EfieldError::InvalidConfig("charge_value"));
        }
        if !positive(self.step_size) {
            return Err(EfieldError::InvalidConfig("step_size"));
        }
        if self.max_steps == 0 {
            return Err(EfieldError::InvalidConfig("max_steps"));
        }
        if self.arrow_stride == 0 {
            return Err(EfieldError::InvalidConfig("arrow_stride"));
        }
        if !self.seed_offset.is_finite() || self.seed_offset < 0.0 {
            return Err(EfieldError::InvalidConfig("seed_offset"));
        }
        if !positive(self.arrow_head_len) {
            return Err(EfieldError::InvalidConfig("arrow_head_len"));
        }
        if !positive(self.line_width) {
            return Err(EfieldError::InvalidConfig("line_width"));
        }
        Ok(())
    }

    /// The viewport described by `width` and `height`.
    ///
    /// Assumes the config was validated; a zero dimension yields an empty
    /// viewport rather than a panic.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height).unwrap_or(Viewport::EMPTY)
    }

    /// The physical constants used by the field evaluator.
    pub fn field_model(&self) -> FieldModel {
        FieldModel {
            coulomb_constant: self.coulomb_constant,
            charge_value: self.charge_value,
            exclusion_radius: self.charge_radius,
        }
    }
}
