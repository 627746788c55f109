//! Per-pixel potential heat map.
//!
//! Two passes: sample `|V|` at every integer pixel coordinate while tracking
//! the maximum, then normalize each sample into 0-255. The map is rebuilt from
//! scratch for every frame.

use glam::Vec2;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::api::config::VizConfig;
use crate::core::charge::{Charge, ChargeSet};
use crate::core::viewport::Viewport;
use crate::field::evaluator::{potential, FieldModel};

/// Normalized potential magnitudes, one byte per pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PotentialMap {
    viewport: Viewport,
    intensity: Vec<u8>,
    max_potential: f32,
}

impl PotentialMap {
    /// Sample and normalize the potential over the whole viewport.
    pub fn compute(charges: &ChargeSet, viewport: Viewport, model: &FieldModel) -> Self {
        let samples = sample_magnitudes(charges.as_slice(), viewport, model);
        let max_potential = samples.iter().copied().fold(0.0f32, f32::max);

        let intensity = if max_potential > 0.0 {
            samples
                .iter()
                .map(|&v| ((v / max_potential * 255.0).floor()).min(255.0) as u8)
                .collect()
        } else {
            vec![0; samples.len()]
        };

        log::debug!(
            "potential map {}x{}: {} charges, max |V| = {}",
            viewport.width(),
            viewport.height(),
            charges.len(),
            max_potential
        );

        Self {
            viewport,
            intensity,
            max_potential,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Largest `|V|` seen during the sweep. Zero when every sample was zero.
    pub fn max_potential(&self) -> f32 {
        self.max_potential
    }

    pub fn intensity(&self) -> &[u8] {
        &self.intensity
    }

    /// Intensity at pixel `(x, y)`, or `None` outside the map.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.viewport.width() || y >= self.viewport.height() {
            return None;
        }
        self.intensity
            .get(y as usize * self.viewport.width() as usize + x as usize)
            .copied()
    }

    /// Diverging red/blue RGBA8 image: `R = i`, `G = 0`, `B = 255 - i`.
    pub fn to_rgba(&self, alpha: u8) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.intensity.len() * 4);
        self.write_rgba(alpha, &mut out);
        out
    }

    /// Like `to_rgba`, reusing `out`'s allocation.
    pub fn write_rgba(&self, alpha: u8, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.intensity.len() * 4);
        for &i in &self.intensity {
            out.extend_from_slice(&[i, 0, 255 - i, alpha]);
        }
    }
}

/// Compute the potential map for the viewport and constants in `config`.
pub fn render_potential_map(charges: &ChargeSet, config: &VizConfig) -> PotentialMap {
    PotentialMap::compute(charges, config.viewport(), &config.field_model())
}

fn sample_magnitudes(charges: &[Charge], viewport: Viewport, model: &FieldModel) -> Vec<f32> {
    let width = viewport.width() as usize;
    let mut samples = vec![0.0f32; viewport.pixel_count()];
    if samples.is_empty() {
        return samples;
    }

    let fill_row = |(y, row): (usize, &mut [f32])| {
        for (x, sample) in row.iter_mut().enumerate() {
            let p = Vec2::new(x as f32, y as f32);
            *sample = potential(p, charges, model).abs();
        }
    };

    #[cfg(feature = "parallel")]
    samples.par_chunks_mut(width).enumerate().for_each(fill_row);
    #[cfg(not(feature = "parallel"))]
    samples.chunks_mut(width).enumerate().for_each(fill_row);

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::charge::Polarity;
    use crate::error::EfieldError;

    fn viewport() -> Viewport {
        Viewport::new(120, 80).unwrap()
    }

    fn set(charges: &[Charge]) -> ChargeSet {
        ChargeSet::try_from_vec(charges.to_vec()).unwrap()
    }

    #[test]
    fn no_charges_is_all_dark() {
        let map = PotentialMap::compute(&ChargeSet::new(), viewport(), &FieldModel::default());
        assert_eq!(map.max_potential(), 0.0);
        assert_eq!(map.intensity().len(), 120 * 80);
        assert!(map.intensity().iter().all(|&i| i == 0));

        let rgba = map.to_rgba(64);
        assert_eq!(&rgba[..4], &[0, 0, 255, 64]);
    }

    #[test]
    fn max_pixel_maps_to_255() {
        let charges = [Charge::positive(40.0, 40.0), Charge::negative(90.0, 30.0)];
        let model = FieldModel::default();
        let map = PotentialMap::compute(&set(&charges), viewport(), &model);

        let mut best = (0, 0, 0.0f32);
        for y in 0..80 {
            for x in 0..120 {
                let v = potential(Vec2::new(x as f32, y as f32), &charges, &model).abs();
                if v > best.2 {
                    best = (x, y, v);
                }
            }
        }
        assert_eq!(map.max_potential(), best.2);
        assert_eq!(map.get(best.0, best.1), Some(255));
    }

    #[test]
    fn intensity_tracks_magnitude() {
        let charges = set(&[Charge::positive(60.0, 40.0)]);
        let map = PotentialMap::compute(&charges, viewport(), &FieldModel::default());
        // Closer to the charge is brighter
        let near = map.get(72, 40).unwrap();
        let far = map.get(110, 40).unwrap();
        assert!(near > far, "near {} far {}", near, far);
        // Inside the exclusion radius the charge contributes nothing
        assert_eq!(map.get(60, 40), Some(0));
    }

    #[test]
    fn rgba_is_diverging() {
        let charges = set(&[Charge::negative(10.0, 10.0)]);
        let map = PotentialMap::compute(&charges, viewport(), &FieldModel::default());
        let rgba = map.to_rgba(64);
        assert_eq!(rgba.len(), 120 * 80 * 4);
        for px in rgba.chunks_exact(4) {
            assert_eq!(px[0] as u16 + px[2] as u16, 255);
            assert_eq!(px[1], 0);
            assert_eq!(px[3], 64);
        }
    }

    #[test]
    fn get_out_of_range() {
        let map = PotentialMap::compute(&ChargeSet::new(), viewport(), &FieldModel::default());
        assert_eq!(map.get(120, 0), None);
        assert_eq!(map.get(0, 80), None);
    }

    #[test]
    fn config_entry_point_uses_config_viewport() {
        let config = VizConfig {
            width: 30,
            height: 20,
            ..VizConfig::default()
        };
        let map = render_potential_map(&set(&[Charge::positive(15.0, 10.0)]), &config);
        assert_eq!(map.intensity().len(), 600);
        assert!(map.intensity().contains(&255));
    }

    #[test]
    fn nan_charge_is_rejected_before_sampling() {
        let charges = vec![
            Charge::positive(40.0, 40.0),
            Charge::new(f32::NAN, 10.0, Polarity::Negative),
        ];
        let err = ChargeSet::try_from_vec(charges).unwrap_err();
        assert!(matches!(err, EfieldError::NonFiniteCharge { index: 1 }));

        let json = r#"[{"x": 40, "y": 40, "isPositive": true}, {"x": 1e39, "y": 10, "isPositive": false}]"#;
        assert!(ChargeSet::from_json(json).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_sweep_matches_per_pixel_loop() {
        let charges = set(&[
            Charge::positive(40.0, 40.0),
            Charge::negative(90.0, 30.0),
            Charge::positive(100.0, 70.0),
        ]);
        let model = FieldModel::default();
        let map = PotentialMap::compute(&charges, viewport(), &model);

        let mut samples = Vec::with_capacity(120 * 80);
        for y in 0..80 {
            for x in 0..120 {
                let p = Vec2::new(x as f32, y as f32);
                samples.push(potential(p, charges.as_slice(), &model).abs());
            }
        }
        let max = samples.iter().copied().fold(0.0f32, f32::max);
        let expected: Vec<u8> = samples
            .iter()
            .map(|&v| ((v / max * 255.0).floor()).min(255.0) as u8)
            .collect();

        assert_eq!(map.max_potential(), max);
        assert_eq!(map.intensity(), &expected[..]);
    }
}
