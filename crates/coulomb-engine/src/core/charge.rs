use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::api::types::{Bounds, ChargeId, Point};
use crate::error::LabError;
use crate::physics::constants::GLYPH_HALF_SIZE;

/// Polarity of a point charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargeSign {
    Positive,
    Negative,
}

impl ChargeSign {
    /// +1.0 for positive, -1.0 for negative.
    pub fn factor(self) -> f64 {
        match self {
            ChargeSign::Positive => 1.0,
            ChargeSign::Negative => -1.0,
        }
    }

    pub fn of(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(ChargeSign::Positive)
        } else if value < 0.0 {
            Some(ChargeSign::Negative)
        } else {
            None
        }
    }
}

/// A point charge on the canvas.
///
/// `(x, y)` is the glyph's top-left anchor; the physical source sits at
/// `center()`. The sign is derived from the value, so they always agree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCharge")]
pub struct Charge {
    pub id: ChargeId,
    pub x: f64,
    pub y: f64,
    sign: ChargeSign,
    value: f64,
}

/// Unvalidated wire form of a charge.
#[derive(Deserialize)]
struct RawCharge {
    id: ChargeId,
    x: f64,
    y: f64,
    sign: Option<ChargeSign>,
    value: f64,
}

impl TryFrom<RawCharge> for Charge {
    type Error = LabError;

    fn try_from(raw: RawCharge) -> Result<Self, Self::Error> {
        let charge = Charge::new(raw.id, raw.x, raw.y, raw.value)?;
        match raw.sign {
            Some(sign) if sign != charge.sign => Err(LabError::InvalidCharge { value: raw.value }),
            _ => Ok(charge),
        }
    }
}

impl Charge {
    /// Build a charge from a signed value. Zero and non-finite values are rejected.
    pub fn new(id: ChargeId, x: f64, y: f64, value: f64) -> Result<Self, LabError> {
        if !value.is_finite() {
            return Err(LabError::InvalidCharge { value });
        }
        let sign = ChargeSign::of(value).ok_or(LabError::InvalidCharge { value })?;
        Ok(Self { id, x, y, sign, value })
    }

    pub fn sign(&self) -> ChargeSign {
        self.sign
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_positive(&self) -> bool {
        self.sign == ChargeSign::Positive
    }

    /// Glyph center, where field and potential originate.
    pub fn center(&self) -> Point {
        DVec2::new(self.x + GLYPH_HALF_SIZE, self.y + GLYPH_HALF_SIZE)
    }

    pub fn set_anchor(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

/// Ordered collection of charges with id allocation.
///
/// This is the value handed to the pure field functions: callers pass
/// `set.as_slice()` and recompute whenever the set changes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChargeSet {
    charges: Vec<Charge>,
    #[serde(skip)]
    next_id: u32,
}

impl ChargeSet {
    pub fn new() -> Self {
        Self {
            charges: Vec::with_capacity(16),
            next_id: 1,
        }
    }

    /// A fresh set holding the two-charge demo.
    pub fn demo_pair(bounds: Bounds) -> Self {
        let mut set = Self::new();
        set.load_demo(bounds);
        set
    }

    /// Replace the contents with +1 centered at (25%, 33%) and -1 at (75%, 66%).
    pub fn load_demo(&mut self, bounds: Bounds) {
        self.charges.clear();
        let presets = [
            (0.25, 0.33, ChargeSign::Positive),
            (0.75, 0.66, ChargeSign::Negative),
        ];
        for (fx, fy, sign) in presets {
            let id = self.allocate_id();
            self.charges.push(Charge {
                id,
                x: bounds.width * fx - GLYPH_HALF_SIZE,
                y: bounds.height * fy - GLYPH_HALF_SIZE,
                sign,
                value: sign.factor(),
            });
        }
    }

    fn peek_id(&self) -> ChargeId {
        ChargeId(self.next_id.max(1))
    }

    fn allocate_id(&mut self) -> ChargeId {
        let id = self.peek_id();
        self.next_id = id.0 + 1;
        id
    }

    /// Add a charge with its anchor at `(x, y)`. Returns the new id.
    /// A rejected value does not consume an id.
    pub fn add(&mut self, x: f64, y: f64, value: f64) -> Result<ChargeId, LabError> {
        let charge = Charge::new(self.peek_id(), x, y, value)?;
        self.allocate_id();
        self.charges.push(charge);
        Ok(charge.id)
    }

    /// Remove a charge. Draw order of the remaining charges is preserved.
    pub fn remove(&mut self, id: ChargeId) -> Result<Charge, LabError> {
        let idx = self
            .charges
            .iter()
            .position(|c| c.id == id)
            .ok_or(LabError::UnknownCharge(id))?;
        Ok(self.charges.remove(idx))
    }

    /// Reposition a charge's anchor.
    pub fn move_to(&mut self, id: ChargeId, x: f64, y: f64) -> Result<(), LabError> {
        let charge = self.get_mut(id).ok_or(LabError::UnknownCharge(id))?;
        charge.set_anchor(x, y);
        Ok(())
    }

    pub fn get(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ChargeId) -> Option<&mut Charge> {
        self.charges.iter_mut().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Charge> {
        self.charges.iter()
    }

    pub fn as_slice(&self) -> &[Charge] {
        &self.charges
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Destroy every charge. Ids keep counting up so stale handles never alias.
    pub fn clear(&mut self) {
        self.charges.clear();
    }
}
