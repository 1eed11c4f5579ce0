//! Physical constants and the fixed thresholds of the canvas field model.
//!
//! Everything here is in canvas units (pixels) except `COULOMB_CONSTANT`,
//! which is the SI value used verbatim for both the simulator and the
//! force calculator.

/// Coulomb's constant k in N·m²/C².
pub const COULOMB_CONSTANT: f64 = 8.99e9;

/// Diameter of a charge glyph on the canvas.
pub const GLYPH_DIAMETER: f64 = 48.0;

/// Offset from a charge's stored anchor to its glyph center.
/// Field and potential originate at the center, not the anchor.
pub const GLYPH_HALF_SIZE: f64 = GLYPH_DIAMETER / 2.0;

/// Field contributions are skipped when r² falls below this (r < 10).
pub const FIELD_MIN_DISTANCE_SQ: f64 = 100.0;

/// Potential contributions are skipped when r falls below this.
pub const POTENTIAL_MIN_DISTANCE: f64 = 10.0;

/// Distance a field line starts away from its seed point.
pub const LINE_START_CLEARANCE: f64 = 15.0;

/// A traced line stops once it comes within this distance² of any charge center (15 units).
pub const LINE_STOP_DISTANCE_SQ: f64 = 225.0;

/// Base integration step, scaled by the caller's strength factor.
pub const BASE_STEP_SIZE: f64 = 5.0;

/// Hard cap on integration steps per field line.
pub const MAX_TRACE_STEPS: usize = 100;

/// Field magnitude below which the direction is considered undefined.
pub const MIN_FIELD_MAGNITUDE: f64 = 1e-6;

/// Spacing of the equipotential sampling grid.
pub const CONTOUR_GRID_SPACING: f64 = 10.0;

/// Upper bound on potential grid nodes. About 20000×20000 canvas units at
/// the default spacing; larger grids are not sampled at all.
pub const MAX_GRID_NODES: usize = 4_000_000;

/// Reference force (N) that saturates the force indicator.
pub const FORCE_INDICATOR_MAX: f64 = 1e-7;
