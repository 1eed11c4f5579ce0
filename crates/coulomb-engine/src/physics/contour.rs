//! Equipotential crossings on a uniform sampling grid.
//!
//! Only the right and down edge of each node are examined, so cells on the
//! boundary can miss crossings. The output is a bag of points in discovery
//! order, not a connected contour; joining them is a visual approximation.

use glam::DVec2;

use crate::api::types::{Bounds, Point};
use crate::core::charge::Charge;
use crate::physics::constants::{CONTOUR_GRID_SPACING, MAX_GRID_NODES};
use crate::physics::field::potential_at;

/// Points where the potential crosses `level`, columns outer, rows inner.
pub fn extract_equipotential(charges: &[Charge], level: f64, bounds: Bounds) -> Vec<Point> {
    let grid = PotentialGrid::sample(charges, bounds, CONTOUR_GRID_SPACING);
    grid.crossings(level)
}

/// Potential sampled once per grid node so a family of levels can share it.
#[derive(Debug, Clone)]
pub struct PotentialGrid {
    spacing: f64,
    cols: usize,
    rows: usize,
    /// Column-major: `values[col * rows + row]`.
    values: Vec<f64>,
}

impl PotentialGrid {
    /// Nodes at `0, spacing, 2·spacing, …` strictly below width and height.
    /// Grids above `MAX_GRID_NODES` nodes come back empty.
    pub fn sample(charges: &[Charge], bounds: Bounds, spacing: f64) -> Self {
        let mut cols = node_count(bounds.width, spacing);
        let mut rows = node_count(bounds.height, spacing);
        match cols.checked_mul(rows) {
            Some(nodes) if nodes <= MAX_GRID_NODES => {}
            _ => {
                log::warn!(
                    "potential grid {}x{} at spacing {spacing} exceeds {MAX_GRID_NODES} nodes, skipped",
                    bounds.width,
                    bounds.height
                );
                cols = 0;
                rows = 0;
            }
        }
        let mut values = Vec::with_capacity(cols * rows);
        for col in 0..cols {
            for row in 0..rows {
                let x = col as f64 * spacing;
                let y = row as f64 * spacing;
                values.push(potential_at(charges, x, y));
            }
        }
        Self { spacing, cols, rows, values }
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn value(&self, col: usize, row: usize) -> f64 {
        self.values[col * self.rows + row]
    }

    fn node(&self, col: usize, row: usize) -> Point {
        DVec2::new(col as f64 * self.spacing, row as f64 * self.spacing)
    }

    /// Interpolated crossings of `level` along right and down edges.
    pub fn crossings(&self, level: f64) -> Vec<Point> {
        let mut points = Vec::new();
        for col in 0..self.cols {
            for row in 0..self.rows {
                let p1 = self.value(col, row);
                let a = self.node(col, row);
                let neighbours = [(col + 1, row), (col, row + 1)];
                for (ncol, nrow) in neighbours {
                    if ncol >= self.cols || nrow >= self.rows {
                        continue;
                    }
                    let p2 = self.value(ncol, nrow);
                    if (p1 - level) * (p2 - level) <= 0.0 {
                        let t = edge_fraction(p1, p2, level);
                        points.push(a.lerp(self.node(ncol, nrow), t));
                    }
                }
            }
        }
        points
    }
}

/// Node count along one axis: coordinates `k·spacing < extent`.
fn node_count(extent: f64, spacing: f64) -> usize {
    let n = (extent / spacing).ceil();
    if !n.is_finite() || n <= 0.0 || spacing <= 0.0 {
        return 0;
    }
    n as usize
}

/// t = |(p1 - level) / (p1 - p2)|. A flat edge sitting exactly on the
/// level has no defined crossing; it is pinned to the first node.
fn edge_fraction(p1: f64, p2: f64, level: f64) -> f64 {
    let denom = p1 - p2;
    if denom == 0.0 {
        return 0.0;
    }
    ((p1 - level) / denom).abs()
}
