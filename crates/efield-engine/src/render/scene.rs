//! Per-frame scene composition.
//!
//! Draw order is fixed: clear, potential map, field lines, charge markers.
//! Later layers occlude earlier ones. Nothing is kept between frames.

use super::canvas::Canvas;
use super::color::Color;
use super::field_lines::render_field_lines;
use super::potential_map::PotentialMap;
use crate::api::config::VizConfig;
use crate::core::charge::{Charge, ChargeSet, Polarity};
use crate::error::Result;

/// Summary of one composed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub charges: usize,
    pub field_lines: usize,
    pub max_potential: f32,
}

/// Draw a charge marker: red for positive, blue for negative, black outline.
pub fn draw_charge(canvas: &mut impl Canvas, charge: &Charge, radius: f32) {
    let fill = match charge.polarity {
        Polarity::Positive => Color::POSITIVE,
        Polarity::Negative => Color::NEGATIVE,
    };
    canvas.fill_circle(charge.pos, radius, fill, Color::BLACK);
}

/// Recompute and redraw the whole scene for `charges`.
///
/// Fails before touching the canvas if `config` is invalid.
pub fn compose_scene(
    charges: &ChargeSet,
    config: &VizConfig,
    canvas: &mut impl Canvas,
) -> Result<FrameStats> {
    config.validate()?;
    let viewport = config.viewport();

    canvas.clear(viewport);

    let map = PotentialMap::compute(charges, viewport, &config.field_model());
    canvas.put_pixels(viewport.width(), viewport.height(), &map.to_rgba(config.map_alpha));

    let field_lines = render_field_lines(charges, config, canvas);

    for charge in charges.iter() {
        draw_charge(canvas, charge, config.charge_radius);
    }

    Ok(FrameStats {
        charges: charges.len(),
        field_lines,
        max_potential: map.max_potential(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EfieldError;
    use crate::render::canvas::{CommandList, DrawCommand};

    fn small_config() -> VizConfig {
        VizConfig {
            width: 200,
            height: 100,
            ..VizConfig::default()
        }
    }

    #[test]
    fn layers_are_drawn_in_order() {
        let mut charges = ChargeSet::new();
        charges.add(50.0, 50.0, Polarity::Positive).unwrap();
        charges.add(150.0, 50.0, Polarity::Negative).unwrap();

        let mut canvas = CommandList::new();
        let stats = compose_scene(&charges, &small_config(), &mut canvas).unwrap();
        assert_eq!(stats.charges, 2);
        assert_eq!(stats.field_lines, 16);
        assert!(stats.max_potential > 0.0);

        let cmds = &canvas.commands;
        assert!(matches!(cmds[0], DrawCommand::Clear { width: 200, height: 100 }));
        match &cmds[1] {
            DrawCommand::Pixels { width, height, rgba } => {
                assert_eq!((*width, *height), (200, 100));
                assert_eq!(rgba.len(), 200 * 100 * 4);
            }
            other => panic!("expected pixels, got {:?}", other),
        }

        // Markers come last, in insertion order
        let n = cmds.len();
        match (&cmds[n - 2], &cmds[n - 1]) {
            (
                DrawCommand::Circle { fill: first, .. },
                DrawCommand::Circle { fill: second, .. },
            ) => {
                assert_eq!(*first, Color::POSITIVE);
                assert_eq!(*second, Color::NEGATIVE);
            }
            other => panic!("expected two markers, got {:?}", other),
        }
        assert_eq!(canvas.circle_count(), 2);
    }

    #[test]
    fn empty_scene_is_clear_plus_dark_map() {
        let mut canvas = CommandList::new();
        let stats = compose_scene(&ChargeSet::new(), &small_config(), &mut canvas).unwrap();
        assert_eq!(stats.field_lines, 0);
        assert_eq!(stats.max_potential, 0.0);
        assert_eq!(canvas.len(), 2);
    }

    #[test]
    fn invalid_config_draws_nothing() {
        let config = VizConfig {
            max_steps: 0,
            ..small_config()
        };
        let mut canvas = CommandList::new();
        let err = compose_scene(&ChargeSet::new(), &config, &mut canvas).unwrap_err();
        assert!(matches!(err, EfieldError::InvalidConfig("max_steps")));
        assert!(canvas.is_empty());
    }

    #[test]
    fn recompose_is_identical() {
        let charges = ChargeSet::from_json(
            r#"[{"x": 40, "y": 60, "isPositive": true}, {"x": 120, "y": 30, "isPositive": false}]"#,
        )
        .unwrap();
        let mut a = CommandList::new();
        let mut b = CommandList::new();
        compose_scene(&charges, &small_config(), &mut a).unwrap();
        compose_scene(&charges, &small_config(), &mut b).unwrap();
        assert_eq!(a.commands, b.commands);
    }
}
