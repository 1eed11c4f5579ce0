use serde::{Deserialize, Serialize};

use crate::api::types::Bounds;
use crate::error::LabError;

/// Potential levels drawn in equipotential mode.
pub const DEFAULT_POTENTIAL_LEVELS: [f64; 12] = [
    -500.0, -200.0, -100.0, -50.0, -20.0, -10.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0,
];

/// Simulator configuration. Every field has a default, so a partial JSON
/// object (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Canvas width in canvas units (default: 800).
    pub world_width: f64,
    /// Canvas height in canvas units (default: 450, a 16:9 canvas).
    pub world_height: f64,
    /// Maximum number of charges on the canvas (default: 64).
    pub max_charges: usize,
    /// Field lines seeded per unit of |charge| (default: 8).
    pub lines_per_unit_charge: f64,
    /// Upper bound on field lines from a single charge (default: 128).
    pub max_lines_per_charge: usize,
    /// Levels drawn in equipotential mode.
    pub potential_levels: Vec<f64>,
    /// Levels with fewer crossings than this are not drawn (default: 3).
    pub min_contour_points: usize,
    /// Initial field strength in [0, 1] (default: 0.5).
    pub default_field_strength: f64,
    /// Initial magnitude for newly added charges, 1 to 10 (default: 5).
    pub default_charge_magnitude: f64,
    /// Load the two-charge demo when the simulator starts empty (default: true).
    pub demo_on_start: bool,
    /// Seed for charge placement (default: 42).
    pub rng_seed: u64,
    /// Vertex capacity of the tessellated line buffer (default: 65536).
    pub max_vector_vertices: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 450.0,
            max_charges: 64,
            lines_per_unit_charge: 8.0,
            max_lines_per_charge: 128,
            potential_levels: DEFAULT_POTENTIAL_LEVELS.to_vec(),
            min_contour_points: 3,
            default_field_strength: 0.5,
            default_charge_magnitude: 5.0,
            demo_on_start: true,
            rng_seed: 42,
            max_vector_vertices: 65536,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LabError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.world_width, self.world_height)
    }
}
