use serde::Serialize;

use crate::api::config::SimConfig;
use crate::api::types::{Bounds, ChargeId, Polyline};
use crate::core::charge::{ChargeSet, ChargeSign};
use crate::core::rng::Rng;
use crate::error::LabError;
use crate::input::queue::{CommandQueue, SimCommand, VisualizationMode};
use crate::physics::force::{compute_force, ForceResult};
use crate::systems::visualization::{build_equipotentials, build_field_lines};

/// Margin kept between a randomly placed charge's anchor and the canvas edge.
const PLACEMENT_MARGIN: f64 = 25.0;

/// Charges in the demo pair.
const DEMO_CHARGES: usize = 2;

/// Everything the renderer needs for one recomputation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldFrame {
    /// Incremented on every recomputation.
    pub revision: u64,
    pub lines: Vec<Polyline>,
}

/// Simulator state holder.
///
/// The UI sends `SimCommand`s; each accepted command marks the state dirty,
/// and the next call to `frame()` rebuilds the polylines from scratch.
/// Nothing is recomputed implicitly.
pub struct Simulator {
    config: SimConfig,
    charges: ChargeSet,
    bounds: Bounds,
    mode: VisualizationMode,
    field_strength: f64,
    charge_magnitude: f64,
    running: bool,
    rng: Rng,
    dirty: bool,
    frame: FieldFrame,
}

impl Simulator {
    pub fn new(config: SimConfig) -> Self {
        let bounds = config.bounds();
        let charges = if !config.demo_on_start {
            ChargeSet::new()
        } else if config.max_charges < DEMO_CHARGES {
            log::warn!("demo pair skipped: charge limit is {}", config.max_charges);
            ChargeSet::new()
        } else {
            ChargeSet::demo_pair(bounds)
        };
        Self {
            bounds,
            charges,
            mode: VisualizationMode::default(),
            field_strength: config.default_field_strength.clamp(0.0, 1.0),
            charge_magnitude: config.default_charge_magnitude.clamp(1.0, 10.0),
            running: false,
            rng: Rng::new(config.rng_seed),
            dirty: true,
            frame: FieldFrame::default(),
            config,
        }
    }

    /// Apply one command. Rejected commands leave the state untouched.
    pub fn apply(&mut self, command: SimCommand) -> Result<(), LabError> {
        match command {
            SimCommand::AddCharge { sign } => {
                let x = self.rng.range(PLACEMENT_MARGIN, self.bounds.width - PLACEMENT_MARGIN);
                let y = self.rng.range(PLACEMENT_MARGIN, self.bounds.height - PLACEMENT_MARGIN);
                self.add_charge(x, y, sign.factor() * self.charge_magnitude)?;
            }
            SimCommand::AddChargeAt { value, x, y } => {
                self.add_charge(x, y, value)?;
            }
            SimCommand::MoveCharge { id, x, y } => self.charges.move_to(id, x, y)?,
            SimCommand::RemoveCharge { id } => {
                self.charges.remove(id)?;
            }
            SimCommand::Reset => self.charges.clear(),
            SimCommand::LoadDemo => {
                if self.config.max_charges < DEMO_CHARGES {
                    return Err(LabError::CapacityExceeded { max: self.config.max_charges });
                }
                self.charges.load_demo(self.bounds);
            }
            SimCommand::SetMode(mode) => self.mode = mode,
            SimCommand::SetFieldStrength(percent) => {
                self.field_strength = (percent / 100.0).clamp(0.0, 1.0);
            }
            SimCommand::SetChargeMagnitude(magnitude) => {
                self.charge_magnitude = magnitude.clamp(1.0, 10.0);
            }
            SimCommand::Resize { width, height } => {
                if !width.is_finite() || !height.is_finite() {
                    return Err(LabError::InvalidBounds { width, height });
                }
                self.bounds = Bounds::new(width.max(0.0), height.max(0.0));
            }
            SimCommand::SetRunning(running) => self.running = running,
            SimCommand::ToggleRunning => self.running = !self.running,
        }
        self.dirty = true;
        Ok(())
    }

    /// Apply every queued command. Failures are logged and skipped.
    /// Returns the number of commands applied.
    pub fn drain(&mut self, queue: &mut CommandQueue) -> usize {
        let mut applied = 0;
        for command in queue.drain() {
            match self.apply(command) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("rejected {command:?}: {e}"),
            }
        }
        applied
    }

    fn add_charge(&mut self, x: f64, y: f64, value: f64) -> Result<ChargeId, LabError> {
        if self.charges.len() >= self.config.max_charges {
            return Err(LabError::CapacityExceeded { max: self.config.max_charges });
        }
        self.charges.add(x, y, value)
    }

    /// Current frame, recomputed first if anything changed.
    /// Paused or empty simulators produce a frame with no lines.
    pub fn frame(&mut self) -> &FieldFrame {
        if self.dirty {
            self.recompute();
        }
        &self.frame
    }

    fn recompute(&mut self) {
        let charges = self.charges.as_slice();
        let lines = if !self.running || charges.is_empty() {
            Vec::new()
        } else {
            match self.mode {
                VisualizationMode::FieldLines => {
                    build_field_lines(charges, self.bounds, self.field_strength, &self.config)
                }
                VisualizationMode::Equipotential => build_equipotentials(
                    charges,
                    self.bounds,
                    &self.config.potential_levels,
                    self.config.min_contour_points,
                ),
            }
        };

        self.frame.revision += 1;
        log::debug!(
            "frame {}: {:?}, {} charges, {} lines, {} points",
            self.frame.revision,
            self.mode,
            charges.len(),
            lines.len(),
            lines.iter().map(Polyline::len).sum::<usize>(),
        );
        self.frame.lines = lines;
        self.dirty = false;
    }

    /// Coulomb force between two charges on the canvas. Their center
    /// separation is converted to metres with `metres_per_unit`.
    pub fn pair_force(&self, a: ChargeId, b: ChargeId, metres_per_unit: f64) -> Result<ForceResult, LabError> {
        let qa = self.charges.get(a).ok_or(LabError::UnknownCharge(a))?;
        let qb = self.charges.get(b).ok_or(LabError::UnknownCharge(b))?;
        let r = qa.center().distance(qb.center()) * metres_per_unit;
        Ok(compute_force(qa.value(), qb.value(), r))
    }

    /// Charges as JSON, for the UI's charge list.
    pub fn charges_json(&self) -> Result<String, LabError> {
        Ok(serde_json::to_string(self.charges.as_slice())?)
    }

    pub fn charges(&self) -> &ChargeSet {
        &self.charges
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    pub fn field_strength(&self) -> f64 {
        self.field_strength
    }

    pub fn charge_magnitude(&self) -> f64 {
        self.charge_magnitude
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
