pub mod api;
pub mod core;
pub mod physics;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::simulator::{FieldFrame, Simulator};
pub use api::types::{Bounds, ChargeId, FieldSample, FieldVector, LineKind, Point, Polyline};
pub use core::charge::{Charge, ChargeSet, ChargeSign};
pub use error::LabError;
pub use input::queue::{CommandQueue, SimCommand, VisualizationMode};
pub use physics::contour::{extract_equipotential, PotentialGrid};
pub use physics::field::{evaluate_field_and_potential, field_at, potential_at};
pub use physics::force::{compute_force, ForceResult, Interaction};
pub use physics::tracer::{trace_field_line, trace_with_reason, TraceStop};
pub use renderer::glyph::{ChargeGlyph, GlyphBuffer};
pub use bridge::protocol::{FrameCounts, ProtocolLayout};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
