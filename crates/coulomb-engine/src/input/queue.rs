use crate::api::types::ChargeId;
use crate::core::charge::ChargeSign;

/// Display mode of the field canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizationMode {
    #[default]
    FieldLines,
    Equipotential,
}

impl VisualizationMode {
    /// Wire encoding used by the browser bridge: 0 = field lines, 1 = equipotential.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(VisualizationMode::FieldLines),
            1 => Some(VisualizationMode::Equipotential),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            VisualizationMode::FieldLines => 0,
            VisualizationMode::Equipotential => 1,
        }
    }
}

/// Commands the UI layer sends to the simulator.
/// Positions are always absolute anchor coordinates; how the UI obtained
/// them (dragging, presets) is its own business.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    /// Add a charge of the current magnitude at a random position.
    AddCharge { sign: ChargeSign },
    /// Add a charge with an explicit value and anchor.
    AddChargeAt { value: f64, x: f64, y: f64 },
    MoveCharge { id: ChargeId, x: f64, y: f64 },
    RemoveCharge { id: ChargeId },
    /// Remove every charge.
    Reset,
    /// Replace the charges with the two-charge demo.
    LoadDemo,
    SetMode(VisualizationMode),
    /// Slider position 0 to 100.
    SetFieldStrength(f64),
    /// Magnitude for subsequently added charges, 1 to 10.
    SetChargeMagnitude(f64),
    Resize { width: f64, height: f64 },
    SetRunning(bool),
    ToggleRunning,
}

/// A queue of simulator commands.
/// JS pushes commands; the runner drains them before recomputing.
pub struct CommandQueue {
    commands: Vec<SimCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, command: SimCommand) {
        self.commands.push(command);
    }

    /// Take all pending commands, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<SimCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = CommandQueue::new();
        q.push(SimCommand::AddCharge { sign: ChargeSign::Positive });
        q.push(SimCommand::SetMode(VisualizationMode::Equipotential));
        assert_eq!(q.len(), 2);
        let commands = q.drain();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1], SimCommand::SetMode(VisualizationMode::Equipotential));
        assert!(q.is_empty());
    }

    #[test]
    fn mode_codes() {
        assert_eq!(VisualizationMode::from_code(0), Some(VisualizationMode::FieldLines));
        assert_eq!(VisualizationMode::from_code(1), Some(VisualizationMode::Equipotential));
        assert_eq!(VisualizationMode::from_code(7), None);
        assert_eq!(VisualizationMode::Equipotential.code(), 1);
    }
}
