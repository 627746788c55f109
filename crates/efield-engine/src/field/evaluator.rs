//! Coulomb field and potential by superposition.
//!
//! Both queries are pure functions of `(point, charges, model)`. Charges closer
//! to the query point than the exclusion radius are skipped, which keeps the
//! sums finite even at a charge's center or where two charges coincide.

use glam::Vec2;

use crate::core::charge::Charge;

/// Physical constants shared by every charge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldModel {
    /// Coulomb's constant k.
    pub coulomb_constant: f32,
    /// Magnitude q of every charge.
    pub charge_value: f32,
    /// Distance within which a charge contributes nothing.
    pub exclusion_radius: f32,
}

impl FieldModel {
    /// k * q.
    #[inline]
    pub fn strength(&self) -> f32 {
        self.coulomb_constant * self.charge_value
    }

    /// Whether `point` lies strictly inside the exclusion radius of `charge`.
    #[inline]
    pub fn is_excluded(&self, point: Vec2, charge: &Charge) -> bool {
        point.distance(charge.pos) < self.exclusion_radius
    }
}

impl Default for FieldModel {
    fn default() -> Self {
        Self {
            coulomb_constant: 8.99e9,
            charge_value: 1e-9,
            exclusion_radius: 10.0,
        }
    }
}

/// Electric field vector at `point`.
///
/// Each charge outside its exclusion radius adds `k*q/r²` along the unit
/// vector from the charge to the point, negated for negative charges.
pub fn field(point: Vec2, charges: &[Charge], model: &FieldModel) -> Vec2 {
    let strength = model.strength();
    let mut e = Vec2::ZERO;
    for charge in charges {
        let d = point - charge.pos;
        let r = d.length();
        if r > model.exclusion_radius {
            let magnitude = strength / (r * r);
            e += d / r * magnitude * charge.polarity.sign();
        }
    }
    e
}

/// Electric potential at `point`: the signed sum of `k*q/r`.
pub fn potential(point: Vec2, charges: &[Charge], model: &FieldModel) -> f32 {
    let strength = model.strength();
    let mut v = 0.0;
    for charge in charges {
        let r = point.distance(charge.pos);
        if r > model.exclusion_radius {
            v += strength / r * charge.polarity.sign();
        }
    }
    v
}
