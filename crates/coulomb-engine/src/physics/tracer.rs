//! Field-line streamlines by fixed-step integration along the normalized field.

use glam::DVec2;

use crate::api::types::{Bounds, Point};
use crate::core::charge::Charge;
use crate::physics::constants::{
    BASE_STEP_SIZE, LINE_START_CLEARANCE, LINE_STOP_DISTANCE_SQ, MAX_TRACE_STEPS,
    MIN_FIELD_MAGNITUDE,
};
use crate::physics::field::field_at;

/// Why a trace ended. Exposed for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceStop {
    StepLimit,
    OutOfBounds,
    NearCharge,
    WeakField,
}

/// Trace a field line from `start` (normally a charge center).
///
/// The first point sits `LINE_START_CLEARANCE` away from `start` along
/// `angle`. From there the line follows the field direction (or its
/// opposite when `outward` is false) in steps of `5 × strength_scale`.
/// At most `MAX_TRACE_STEPS` steps are taken. Every point after the first
/// lies inside `bounds` and outside the stop radius of every charge.
pub fn trace_field_line(
    charges: &[Charge],
    start: Point,
    angle: f64,
    outward: bool,
    bounds: Bounds,
    strength_scale: f64,
) -> Vec<Point> {
    trace_with_reason(charges, start, angle, outward, bounds, strength_scale).0
}

/// Same as `trace_field_line`, also reporting which condition stopped it.
pub fn trace_with_reason(
    charges: &[Charge],
    start: Point,
    angle: f64,
    outward: bool,
    bounds: Bounds,
    strength_scale: f64,
) -> (Vec<Point>, TraceStop) {
    let step_size = BASE_STEP_SIZE * strength_scale;
    let direction = if outward { 1.0 } else { -1.0 };

    let mut p = start + DVec2::from_angle(angle) * LINE_START_CLEARANCE;
    let mut points = Vec::with_capacity(MAX_TRACE_STEPS + 1);
    points.push(p);

    for _ in 0..MAX_TRACE_STEPS {
        let field = field_at(charges, p.x, p.y);
        let dir = match field.direction() {
            Some(dir) if field.magnitude >= MIN_FIELD_MAGNITUDE => dir,
            _ => return (points, TraceStop::WeakField),
        };
        p += dir * (direction * step_size);

        if !bounds.contains(p) {
            return (points, TraceStop::OutOfBounds);
        }
        if near_any_charge(charges, p) {
            return (points, TraceStop::NearCharge);
        }
        points.push(p);
    }

    (points, TraceStop::StepLimit)
}

fn near_any_charge(charges: &[Charge], p: Point) -> bool {
    charges
        .iter()
        .any(|c| p.distance_squared(c.center()) < LINE_STOP_DISTANCE_SQ)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ChargeId;
    use std::f64::consts::{FRAC_PI_2, PI};

    const BOUNDS: Bounds = Bounds::new(800.0, 450.0);

    fn centered(id: u32, cx: f64, cy: f64, value: f64) -> Charge {
        Charge::new(ChargeId(id), cx - 24.0, cy - 24.0, value).unwrap()
    }

    #[test]
    fn starts_at_clearance_along_angle() {
        let q = [centered(1, 400.0, 225.0, 1.0)];
        let pts = trace_field_line(&q, q[0].center(), FRAC_PI_2, true, BOUNDS, 1.0);
        assert!((pts[0].x - 400.0).abs() < 1e-9);
        assert!((pts[0].y - 240.0).abs() < 1e-9);
    }

    #[test]
    fn lone_positive_line_runs_radially_to_the_edge() {
        let q = [centered(1, 400.0, 225.0, 1.0)];
        let (pts, stop) = trace_with_reason(&q, q[0].center(), 0.0, true, BOUNDS, 0.5);
        // 15 + 100 × 2.5 stays short of the right edge 400 units away.
        assert_eq!(stop, TraceStop::StepLimit);
        assert_eq!(pts.len(), MAX_TRACE_STEPS + 1);
        for w in pts.windows(2) {
            assert!(w[1].x > w[0].x);
            assert!((w[1].distance(w[0]) - 2.5).abs() < 1e-9);
            assert!((w[1].y - 225.0).abs() < 1e-6);
        }
    }

    #[test]
    fn large_steps_leave_the_canvas() {
        let q = [centered(1, 400.0, 225.0, 1.0)];
        let (pts, stop) = trace_with_reason(&q, q[0].center(), PI, true, BOUNDS, 2.0);
        assert_eq!(stop, TraceStop::OutOfBounds);
        assert!(pts.iter().all(|p| BOUNDS.contains(*p)));
        assert!(pts.len() < MAX_TRACE_STEPS + 1);
    }

    #[test]
    fn dipole_line_ends_at_the_sink() {
        let pos = centered(1, 300.0, 225.0, 1.0);
        let neg = centered(2, 500.0, 225.0, -1.0);
        let q = [pos, neg];
        let (pts, stop) = trace_with_reason(&q, pos.center(), 0.0, true, BOUNDS, 1.0);
        assert_eq!(stop, TraceStop::NearCharge);
        let last = *pts.last().unwrap();
        assert!(last.distance(neg.center()) < 25.0);
        for p in &pts[1..] {
            for c in &q {
                assert!(p.distance_squared(c.center()) >= LINE_STOP_DISTANCE_SQ);
            }
        }
    }

    #[test]
    fn inward_trace_runs_against_the_field() {
        // Around a negative charge the field points inward; tracing with
        // outward = false walks away from it.
        let q = [centered(1, 400.0, 225.0, -1.0)];
        let pts = trace_field_line(&q, q[0].center(), 0.0, false, BOUNDS, 1.0);
        assert!(pts.len() > 2);
        assert!(pts[2].x > pts[1].x);
    }

    #[test]
    fn no_charges_stops_on_weak_field() {
        let (pts, stop) = trace_with_reason(&[], DVec2::new(100.0, 100.0), 0.0, true, BOUNDS, 1.0);
        assert_eq!(stop, TraceStop::WeakField);
        assert_eq!(pts.len(), 1);
    }

    #[test]
    fn deterministic() {
        let q = [centered(1, 250.0, 150.0, 3.0), centered(2, 520.0, 310.0, -2.0)];
        let a = trace_field_line(&q, q[0].center(), 0.7, true, BOUNDS, 0.5);
        let b = trace_field_line(&q, q[0].center(), 0.7, true, BOUNDS, 0.5);
        assert_eq!(a, b);
    }
}
