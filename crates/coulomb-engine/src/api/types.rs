use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A location on the canvas. Pure value, no identity.
pub type Point = DVec2;

/// Unique identifier for a charge within a `ChargeSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeId(pub u32);

impl std::fmt::Display for ChargeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canvas extents supplied by the hosting container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Inclusive containment: points on the edge are still inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Net electric field at a sample point.
///
/// `magnitude` is cached but always equals `sqrt(x² + y²)`; the only way to
/// build one is from its components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FieldVector {
    pub x: f64,
    pub y: f64,
    pub magnitude: f64,
}

impl FieldVector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, magnitude: 0.0 };

    pub fn from_components(x: f64, y: f64) -> Self {
        Self { x, y, magnitude: (x * x + y * y).sqrt() }
    }

    /// Unit direction, or `None` when the magnitude is zero.
    pub fn direction(&self) -> Option<DVec2> {
        if self.magnitude > 0.0 {
            Some(DVec2::new(self.x / self.magnitude, self.y / self.magnitude))
        } else {
            None
        }
    }
}

/// Field and potential evaluated together at one point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FieldSample {
    pub field: FieldVector,
    pub potential: f64,
}

/// What a polyline depicts. Renderers pick stroke style from this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    FieldLine,
    Equipotential { level: f64 },
}

/// An ordered sequence of points, rebuilt on every recomputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub kind: LineKind,
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn new(kind: LineKind, points: Vec<Point>) -> Self {
        Self { kind, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
