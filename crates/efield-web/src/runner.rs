use efield_engine::{
    compose_scene, field, potential, trace_line, ChargeSet, FrameStats, Polarity, Result,
    VectorCanvas, VizConfig,
};
use efield_engine::glam::Vec2;

/// Owns the charge set and the render buffers for one canvas.
///
/// The browser mutates charges through this type and calls `render()` once
/// per animation frame; the scene is only recomputed after a mutation.
pub struct Visualizer {
    config: VizConfig,
    charges: ChargeSet,
    canvas: VectorCanvas,
    dirty: bool,
    last_frame: Option<FrameStats>,
}

impl Visualizer {
    pub fn new(config: VizConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            charges: ChargeSet::new(),
            canvas: VectorCanvas::new(),
            dirty: true,
            last_frame: None,
        })
    }

    /// Update the config from a partial JSON object. Absent fields keep
    /// their current values; on error the old config is kept.
    pub fn configure(&mut self, json: &str) -> Result<()> {
        self.config = self.config.merge_json(json)?;
        self.dirty = true;
        Ok(())
    }

    /// Replace the whole charge list. On error the old list is kept.
    pub fn set_charges_json(&mut self, json: &str) -> Result<()> {
        self.charges = ChargeSet::from_json(json)?;
        self.dirty = true;
        Ok(())
    }

    pub fn add_charge(&mut self, x: f32, y: f32, is_positive: bool) -> Result<usize> {
        let index = self.charges.add(x, y, Polarity::from_positive(is_positive))?;
        self.dirty = true;
        Ok(index)
    }

    pub fn move_charge(&mut self, index: usize, x: f32, y: f32) -> Result<()> {
        self.charges.move_to(index, Vec2::new(x, y))?;
        self.dirty = true;
        Ok(())
    }

    /// Hit test against the charge markers.
    pub fn charge_at(&self, x: f32, y: f32) -> Option<usize> {
        self.charges.charge_at(Vec2::new(x, y), self.config.charge_radius)
    }

    pub fn charges(&self) -> &ChargeSet {
        &self.charges
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    /// Redraw if anything changed since the last frame. Returns whether it did.
    pub fn render(&mut self) -> Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let stats = compose_scene(&self.charges, &self.config, &mut self.canvas)?;
        log::debug!(
            "frame: {} charges, {} lines, max |V| {}",
            stats.charges,
            stats.field_lines,
            stats.max_potential
        );
        self.last_frame = Some(stats);
        self.dirty = false;
        Ok(true)
    }

    pub fn last_frame(&self) -> Option<FrameStats> {
        self.last_frame
    }

    // ---- Pure queries ----

    pub fn field_at(&self, x: f32, y: f32) -> [f32; 2] {
        field(Vec2::new(x, y), self.charges.as_slice(), &self.config.field_model()).to_array()
    }

    pub fn potential_at(&self, x: f32, y: f32) -> f32 {
        potential(Vec2::new(x, y), self.charges.as_slice(), &self.config.field_model())
    }

    /// Traced line as flat `[x0, y0, x1, y1, ...]`.
    pub fn trace(&self, x: f32, y: f32, is_positive: bool) -> Result<Vec<f32>> {
        let line = trace_line(
            Vec2::new(x, y),
            Polarity::from_positive(is_positive),
            &self.charges,
            &self.config,
        )?;
        Ok(line.points.iter().flat_map(|p| p.to_array()).collect())
    }

    /// Current charge list in its JSON wire format.
    pub fn charges_json(&self) -> Result<String> {
        self.charges.to_json()
    }

    // ---- Buffer accessors for JS reads ----

    pub fn pixels_ptr(&self) -> *const u8 {
        self.canvas.pixels().as_ptr()
    }

    pub fn pixels_len(&self) -> u32 {
        self.canvas.pixels().len() as u32
    }

    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.canvas.vertex_floats().as_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        self.canvas.vertex_count() as u32
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use efield_engine::EfieldError;

    fn small() -> Visualizer {
        Visualizer::new(VizConfig {
            width: 160,
            height: 120,
            ..VizConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn renders_only_after_changes() {
        let mut viz = small();
        assert!(viz.render().unwrap());
        assert!(!viz.render().unwrap());

        viz.add_charge(80.0, 60.0, true).unwrap();
        assert!(viz.render().unwrap());
        assert_eq!(viz.last_frame().unwrap().field_lines, 8);
        assert_eq!(viz.pixels_len(), 160 * 120 * 4);
        assert!(viz.vector_vertex_count() > 0);
    }

    #[test]
    fn bad_charge_json_keeps_previous_set() {
        let mut viz = small();
        viz.add_charge(10.0, 10.0, false).unwrap();
        let err = viz.set_charges_json(r#"[{"x": 1}]"#).unwrap_err();
        assert!(matches!(err, EfieldError::Json(_)));
        assert_eq!(viz.charges().len(), 1);
    }

    #[test]
    fn drag_moves_hit_charge() {
        let mut viz = small();
        viz.add_charge(40.0, 40.0, true).unwrap();
        let hit = viz.charge_at(45.0, 42.0).unwrap();
        viz.move_charge(hit, 100.0, 90.0).unwrap();
        assert_eq!(viz.charges().get(hit).unwrap().pos, Vec2::new(100.0, 90.0));
        assert!(viz.charge_at(45.0, 42.0).is_none());
        assert!(viz.move_charge(3, 0.0, 0.0).is_err());
    }

    #[test]
    fn queries_match_engine() {
        let mut viz = small();
        viz.add_charge(20.0, 60.0, true).unwrap();
        let [ex, ey] = viz.field_at(70.0, 60.0);
        assert!(ex > 0.0);
        assert_eq!(ey, 0.0);
        assert!(viz.potential_at(70.0, 60.0) > 0.0);

        let flat = viz.trace(31.0, 60.0, true).unwrap();
        assert_eq!(flat.len() % 2, 0);
        assert_eq!(&flat[..2], &[31.0, 60.0]);
        assert!(matches!(
            viz.trace(f32::NAN, 60.0, true),
            Err(EfieldError::NonFiniteSeed { .. })
        ));
    }

    #[test]
    fn configure_rejects_invalid() {
        let mut viz = small();
        assert!(viz.configure(r#"{"step_size": -1}"#).is_err());
        assert_eq!(viz.width(), 160);
        assert!(viz.configure(r#"{"width": 5000}"#).is_err());
        assert_eq!(viz.width(), 160);
        viz.configure(r#"{"width": 64, "height": 48}"#).unwrap();
        viz.render().unwrap();
        assert_eq!(viz.pixels_len(), 64 * 48 * 4);
    }

    #[test]
    fn partial_configure_keeps_viewport() {
        let mut viz = small();
        viz.add_charge(80.0, 60.0, true).unwrap();
        viz.configure(r#"{"lines_per_charge": 16}"#).unwrap();
        assert_eq!((viz.width(), viz.height()), (160, 120));
        assert_eq!(viz.config().lines_per_charge, 16);

        assert!(viz.render().unwrap());
        assert_eq!(viz.pixels_len(), 160 * 120 * 4);
        assert_eq!(viz.last_frame().unwrap().field_lines, 16);
    }

    #[test]
    fn charges_json_uses_wire_format() {
        let mut viz = small();
        viz.add_charge(10.0, 20.0, false).unwrap();
        assert_eq!(
            viz.charges_json().unwrap(),
            r#"[{"x":10.0,"y":20.0,"isPositive":false}]"#
        );
    }
}
