//! Net electric field and potential by superposition over point charges.
//!
//! Each charge acts from its glyph center. Inside a small radius around a
//! center the charge's contribution is dropped rather than clamped
//! (r² < 100 for the field, r < 10 for the potential). That keeps values
//! bounded near sources at the cost of a discontinuity there; it is a
//! visual approximation, not physics.

use glam::DVec2;

use crate::api::types::{FieldSample, FieldVector, Point};
use crate::core::charge::Charge;
use crate::physics::constants::{COULOMB_CONSTANT, FIELD_MIN_DISTANCE_SQ, POTENTIAL_MIN_DISTANCE};

/// Field vector at `(x, y)`.
pub fn field_at(charges: &[Charge], x: f64, y: f64) -> FieldVector {
    let p = DVec2::new(x, y);
    let mut sum = DVec2::ZERO;
    for charge in charges {
        if let Some(contribution) = field_contribution(charge, p) {
            sum += contribution;
        }
    }
    FieldVector::from_components(sum.x, sum.y)
}

/// Scalar potential at `(x, y)`. Contributions are summed with sign, so they can cancel.
pub fn potential_at(charges: &[Charge], x: f64, y: f64) -> f64 {
    let p = DVec2::new(x, y);
    charges
        .iter()
        .filter_map(|charge| potential_contribution(charge, p))
        .sum()
}

/// Field and potential together.
pub fn evaluate_field_and_potential(charges: &[Charge], x: f64, y: f64) -> FieldSample {
    FieldSample {
        field: field_at(charges, x, y),
        potential: potential_at(charges, x, y),
    }
}

/// k·|q|/r² along the radial unit vector, flipped inward for negative charges.
fn field_contribution(charge: &Charge, p: Point) -> Option<DVec2> {
    let d = p - charge.center();
    let r_sq = d.length_squared();
    if r_sq < FIELD_MIN_DISTANCE_SQ {
        return None;
    }
    let magnitude = COULOMB_CONSTANT * charge.value().abs() / r_sq;
    let unit = d / r_sq.sqrt();
    Some(unit * magnitude * charge.sign().factor())
}

fn potential_contribution(charge: &Charge, p: Point) -> Option<f64> {
    let r = p.distance(charge.center());
    if r < POTENTIAL_MIN_DISTANCE {
        return None;
    }
    Some(COULOMB_CONSTANT * charge.value() / r)
}
