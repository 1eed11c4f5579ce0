//! Line-density policy on top of the tracer and contour extractor.
//!
//! How many field lines a charge gets and which potential levels are drawn
//! only affects how the picture looks, so it lives here rather than in the
//! physics functions.

use std::f64::consts::TAU;

use crate::api::config::SimConfig;
use crate::api::types::{Bounds, LineKind, Polyline};
use crate::core::charge::Charge;
use crate::physics::constants::CONTOUR_GRID_SPACING;
use crate::physics::contour::PotentialGrid;
use crate::physics::tracer::trace_field_line;

/// Number of lines seeded from `charge`: `ceil(|q| × per_unit)`, capped.
pub fn seed_count(charge: &Charge, per_unit: f64, max: usize) -> usize {
    let n = (charge.value().abs() * per_unit).ceil();
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    (n as usize).min(max)
}

/// Evenly spaced seed angles, `2π / count` apart, starting at 0.
pub fn seed_angles(count: usize) -> impl Iterator<Item = f64> {
    let step = if count == 0 { 0.0 } else { TAU / count as f64 };
    (0..count).map(move |i| i as f64 * step)
}

/// Field lines for every charge. Each polyline starts at its charge's center.
pub fn build_field_lines(
    charges: &[Charge],
    bounds: Bounds,
    strength: f64,
    config: &SimConfig,
) -> Vec<Polyline> {
    let mut lines = Vec::new();
    for charge in charges {
        let count = seed_count(charge, config.lines_per_unit_charge, config.max_lines_per_charge);
        let center = charge.center();
        for angle in seed_angles(count) {
            let traced = trace_field_line(charges, center, angle, charge.is_positive(), bounds, strength);
            let mut points = Vec::with_capacity(traced.len() + 1);
            points.push(center);
            points.extend(traced);
            lines.push(Polyline::new(LineKind::FieldLine, points));
        }
    }
    lines
}

/// One contour per level, skipping levels with fewer than `min_points` crossings.
/// The potential grid is sampled once and shared by every level.
pub fn build_equipotentials(
    charges: &[Charge],
    bounds: Bounds,
    levels: &[f64],
    min_points: usize,
) -> Vec<Polyline> {
    let grid = PotentialGrid::sample(charges, bounds, CONTOUR_GRID_SPACING);
    levels
        .iter()
        .filter_map(|&level| {
            let points = grid.crossings(level);
            if points.len() < min_points {
                log::trace!("equipotential {level}: {} crossings, skipped", points.len());
                return None;
            }
            Some(Polyline::new(LineKind::Equipotential { level }, points))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ChargeId;
    use crate::physics::contour::extract_equipotential;

    fn centered(id: u32, cx: f64, cy: f64, value: f64) -> Charge {
        Charge::new(ChargeId(id), cx - 24.0, cy - 24.0, value).unwrap()
    }

    #[test]
    fn seed_count_scales_with_magnitude() {
        let c = centered(1, 0.0, 0.0, -5.0);
        assert_eq!(seed_count(&c, 8.0, 128), 40);
        let small = centered(2, 0.0, 0.0, 0.01);
        assert_eq!(seed_count(&small, 8.0, 128), 1);
        let big = centered(3, 0.0, 0.0, 1e6);
        assert_eq!(seed_count(&big, 8.0, 128), 128);
    }

    #[test]
    fn seed_angles_are_even() {
        let angles: Vec<f64> = seed_angles(4).collect();
        assert_eq!(angles.len(), 4);
        assert!((angles[1] - TAU / 4.0).abs() < 1e-12);
        assert!((angles[3] - 3.0 * TAU / 4.0).abs() < 1e-12);
        assert_eq!(seed_angles(0).count(), 0);
    }

    #[test]
    fn field_lines_start_at_charge_centers() {
        let q = [centered(1, 200.0, 200.0, 1.0), centered(2, 600.0, 250.0, -2.0)];
        let lines = build_field_lines(&q, Bounds::new(800.0, 450.0), 0.5, &SimConfig::default());
        assert_eq!(lines.len(), 8 + 16);
        assert!(lines.iter().all(|l| l.kind == LineKind::FieldLine));
        assert_eq!(lines[0].points[0], q[0].center());
        assert_eq!(lines[8].points[0], q[1].center());
        assert!(lines.iter().all(|l| l.len() >= 2));
    }

    #[test]
    fn equipotentials_match_single_level_extraction() {
        let q = [centered(1, 300.0, 200.0, 1e-6), centered(2, 500.0, 200.0, -1e-6)];
        let bounds = Bounds::new(800.0, 450.0);
        let levels = [-50.0, 50.0];
        let contours = build_equipotentials(&q, bounds, &levels, 3);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[1].points, extract_equipotential(&q, 50.0, bounds));
    }

    #[test]
    fn sparse_levels_are_suppressed() {
        let q = [centered(1, 300.0, 200.0, 1e-6)];
        let contours = build_equipotentials(&q, Bounds::new(800.0, 450.0), &[-50.0, 1e12], 3);
        assert!(contours.is_empty());
    }
}
