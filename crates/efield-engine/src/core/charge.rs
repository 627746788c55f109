use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{EfieldError, Result};

/// Sign of a point charge. Magnitude is shared by all charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn from_positive(is_positive: bool) -> Self {
        if is_positive {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }

    pub fn is_positive(self) -> bool {
        self == Polarity::Positive
    }

    /// +1.0 or -1.0.
    pub fn sign(self) -> f32 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

/// A point charge in viewport pixel coordinates.
///
/// Wire format: `{ "x": 120.0, "y": 80.0, "isPositive": true }`.
/// All three fields are required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ChargeRecord", into = "ChargeRecord")]
pub struct Charge {
    pub pos: Vec2,
    pub polarity: Polarity,
}

impl Charge {
    pub fn new(x: f32, y: f32, polarity: Polarity) -> Self {
        Self {
            pos: Vec2::new(x, y),
            polarity,
        }
    }

    pub fn positive(x: f32, y: f32) -> Self {
        Self::new(x, y, Polarity::Positive)
    }

    pub fn negative(x: f32, y: f32) -> Self {
        Self::new(x, y, Polarity::Negative)
    }

    pub fn is_finite(&self) -> bool {
        self.pos.is_finite()
    }
}

#[derive(Serialize, Deserialize)]
struct ChargeRecord {
    x: f32,
    y: f32,
    #[serde(rename = "isPositive")]
    is_positive: bool,
}

impl From<ChargeRecord> for Charge {
    fn from(r: ChargeRecord) -> Self {
        Charge::new(r.x, r.y, Polarity::from_positive(r.is_positive))
    }
}

impl From<Charge> for ChargeRecord {
    fn from(c: Charge) -> Self {
        ChargeRecord {
            x: c.pos.x,
            y: c.pos.y,
            is_positive: c.polarity.is_positive(),
        }
    }
}

/// Ordered, append-only list of charges.
///
/// Every charge stored here has a finite position; the renderers rely on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargeSet {
    charges: Vec<Charge>,
}

impl ChargeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of charge records.
    ///
    /// Missing fields, wrong types and non-finite coordinates are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let charges: Vec<Charge> = serde_json::from_str(json)?;
        Self::try_from_vec(charges)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.charges)?)
    }

    pub fn try_from_vec(charges: Vec<Charge>) -> Result<Self> {
        if let Some(index) = charges.iter().position(|c| !c.is_finite()) {
            log::warn!("rejecting charge list: charge {} is not finite", index);
            return Err(EfieldError::NonFiniteCharge { index });
        }
        Ok(Self { charges })
    }

    /// Append a charge. Returns its index.
    pub fn push(&mut self, charge: Charge) -> Result<usize> {
        if !charge.is_finite() {
            return Err(EfieldError::NonFiniteCharge {
                index: self.charges.len(),
            });
        }
        self.charges.push(charge);
        Ok(self.charges.len() - 1)
    }

    pub fn add(&mut self, x: f32, y: f32, polarity: Polarity) -> Result<usize> {
        self.push(Charge::new(x, y, polarity))
    }

    /// Rewrite the position of an existing charge.
    pub fn move_to(&mut self, index: usize, pos: Vec2) -> Result<()> {
        let len = self.charges.len();
        if !pos.is_finite() {
            return Err(EfieldError::NonFiniteCharge { index });
        }
        let charge = self
            .charges
            .get_mut(index)
            .ok_or(EfieldError::ChargeIndex { index, len })?;
        charge.pos = pos;
        Ok(())
    }

    /// Index of the first charge whose center is strictly closer than `radius`.
    pub fn charge_at(&self, point: Vec2, radius: f32) -> Option<usize> {
        self.charges
            .iter()
            .position(|c| c.pos.distance(point) < radius)
    }

    pub fn get(&self, index: usize) -> Option<&Charge> {
        self.charges.get(index)
    }

    pub fn as_slice(&self) -> &[Charge] {
        &self.charges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Charge> {
        self.charges.iter()
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }
}

impl AsRef<[Charge]> for ChargeSet {
    fn as_ref(&self) -> &[Charge] {
        &self.charges
    }
}
