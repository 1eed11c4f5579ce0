//! Coulomb's law for a pair of scalar charges, plus the presentation helpers
//! the calculator and the force indicator use.

use std::fmt;

use serde::Serialize;

use crate::physics::constants::{COULOMB_CONSTANT, FORCE_INDICATOR_MAX};

/// Whether a pair of charges pulls together or pushes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Interaction {
    Attractive,
    Repulsive,
}

impl Interaction {
    /// Attractive only for strictly opposite signs. Zero operands count as repulsive.
    pub fn classify(q1: f64, q2: f64) -> Self {
        if (q1 > 0.0 && q2 < 0.0) || (q1 < 0.0 && q2 > 0.0) {
            Interaction::Attractive
        } else {
            Interaction::Repulsive
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Interaction::Attractive => "Attractive (opposite signs)",
            Interaction::Repulsive => "Repulsive (same signs)",
        }
    }
}

/// Output of the force calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForceResult {
    /// Force magnitude in newtons.
    pub magnitude: f64,
    pub interaction: Interaction,
}

impl ForceResult {
    pub fn is_attractive(&self) -> bool {
        self.interaction == Interaction::Attractive
    }

    /// Magnitude scaled against `max_force` and clamped to [0, 1].
    pub fn normalized(&self, max_force: f64) -> f64 {
        if max_force <= 0.0 || self.magnitude.is_nan() {
            return 0.0;
        }
        (self.magnitude / max_force).min(1.0)
    }

    /// Fill level of the force indicator, saturating at `FORCE_INDICATOR_MAX`.
    pub fn indicator_level(&self) -> f64 {
        self.normalized(FORCE_INDICATOR_MAX)
    }

    /// Magnitude formatted for display, e.g. `8.19 × 10⁻⁸ N`.
    pub fn display_magnitude(&self) -> String {
        format!("{} N", ScientificNotation(self.magnitude))
    }
}

/// F = k·|q1·q2| / r².
///
/// Requires `r > 0`. Zero separation is not special-cased and yields an
/// infinite magnitude; callers guard against it.
pub fn compute_force(q1: f64, q2: f64, r: f64) -> ForceResult {
    ForceResult {
        magnitude: COULOMB_CONSTANT * (q1 * q2).abs() / (r * r),
        interaction: Interaction::classify(q1, q2),
    }
}

/// Two-decimal mantissa with a superscript power of ten.
#[derive(Debug, Clone, Copy)]
pub struct ScientificNotation(pub f64);

impl fmt::Display for ScientificNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 || !v.is_finite() {
            return write!(f, "{v}");
        }
        let mut exponent = v.abs().log10().floor() as i32;
        let mut mantissa = v / 10f64.powi(exponent);
        // 9.996 rounds to "10.00"; carry into the exponent instead.
        if (mantissa.abs() * 100.0).round() >= 1000.0 {
            mantissa /= 10.0;
            exponent += 1;
        }
        write!(f, "{mantissa:.2} × 10{}", superscript(exponent))
    }
}

fn superscript(n: i32) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    let mut out = String::new();
    if n < 0 {
        out.push('⁻');
    }
    for c in n.unsigned_abs().to_string().chars() {
        if let Some(d) = c.to_digit(10) {
            out.push(DIGITS[d as usize]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn electron_proton_pair() {
        let f = compute_force(1.6e-19, -1.6e-19, 5.3e-11);
        assert!((f.magnitude - 8.2e-8).abs() / 8.2e-8 < 0.01, "F = {}", f.magnitude);
        assert!(f.is_attractive());
    }

    #[test]
    fn microcoulomb_pair() {
        let f = compute_force(2.0e-6, 3.0e-6, 0.15);
        assert!((f.magnitude - 2.4).abs() < 0.01, "F = {}", f.magnitude);
        assert_eq!(f.interaction, Interaction::Repulsive);
    }

    #[test]
    fn inverse_square() {
        let near = compute_force(3.0e-6, -5.0e-6, 0.2);
        let far = compute_force(3.0e-6, -5.0e-6, 0.4);
        assert!((far.magnitude - near.magnitude / 4.0).abs() < 1e-12 * near.magnitude);
    }

    #[test]
    fn classification() {
        assert_eq!(Interaction::classify(-1.0, -2.0), Interaction::Repulsive);
        assert_eq!(Interaction::classify(0.0, -2.0), Interaction::Repulsive);
        assert_eq!(Interaction::classify(0.0, 0.0), Interaction::Repulsive);
        assert_eq!(Interaction::classify(1.0, -2.0), Interaction::Attractive);
    }

    #[test]
    fn zero_separation_is_infinite() {
        assert!(compute_force(1.0, 1.0, 0.0).magnitude.is_infinite());
    }

    #[test]
    fn normalized_saturates() {
        let f = compute_force(1.6e-19, -1.6e-19, 5.3e-11);
        let n = f.normalized(1e-7);
        assert!(n > 0.8 && n < 0.83, "n = {n}");
        assert_eq!(compute_force(2.0e-6, 3.0e-6, 0.15).normalized(1e-7), 1.0);
        assert_eq!(f.normalized(0.0), 0.0);
        assert_eq!(f.indicator_level(), n);
    }

    #[test]
    fn scientific_formatting() {
        assert_eq!(ScientificNotation(8.19e-8).to_string(), "8.19 × 10⁻⁸");
        assert_eq!(ScientificNotation(2.397).to_string(), "2.40 × 10⁰");
        assert_eq!(ScientificNotation(1.5e12).to_string(), "1.50 × 10¹²");
        assert_eq!(ScientificNotation(9.999e-3).to_string(), "1.00 × 10⁻²");
        assert_eq!(ScientificNotation(0.0).to_string(), "0");

        let f = compute_force(2.0e-6, 3.0e-6, 0.15);
        assert_eq!(f.display_magnitude(), "2.40 × 10⁰ N");
        assert_eq!(f.interaction.label(), "Repulsive (same signs)");
    }
}
