use coulomb_engine::bridge::protocol::HEADER_FLOATS;
use coulomb_engine::{
    ChargeId, CommandQueue, FrameCounts, GlyphBuffer, LabError, ProtocolLayout, SimCommand,
    SimConfig, Simulator,
};
#[cfg(feature = "vectors")]
use coulomb_engine::VectorState;

/// Wires the simulator to the browser.
///
/// JS pushes commands as the user interacts; `tick()` drains them once per
/// animation frame and, when anything changed, rebuilds the glyph and line
/// buffers that JS reads straight out of wasm memory.
pub struct LabRunner {
    sim: Simulator,
    commands: CommandQueue,
    glyphs: GlyphBuffer,
    #[cfg(feature = "vectors")]
    vectors: VectorState,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    /// Revision of the frame the buffers were last built from.
    built_revision: Option<u64>,
}

impl LabRunner {
    pub fn new(config: SimConfig) -> Self {
        let layout = ProtocolLayout::from_config(&config);
        Self {
            glyphs: GlyphBuffer::with_capacity(layout.max_glyphs),
            #[cfg(feature = "vectors")]
            vectors: VectorState::with_capacity(layout.max_vector_vertices),
            header: [0.0; HEADER_FLOATS],
            built_revision: None,
            commands: CommandQueue::new(),
            sim: Simulator::new(config),
            layout,
        }
    }

    pub fn push(&mut self, command: SimCommand) {
        self.commands.push(command);
    }

    /// Apply pending commands so queries see the latest state.
    fn sync(&mut self) {
        if !self.commands.is_empty() {
            self.sim.drain(&mut self.commands);
        }
    }

    /// Apply pending commands and rebuild the buffers if the frame changed.
    /// Returns whether the buffers were rebuilt.
    pub fn tick(&mut self) -> bool {
        self.sync();

        let frame = self.sim.frame();
        if self.built_revision == Some(frame.revision) {
            return false;
        }

        #[cfg(feature = "vectors")]
        self.vectors.draw_frame(frame);
        self.built_revision = Some(frame.revision);
        let revision = frame.revision;

        self.glyphs.rebuild(self.sim.charges().iter());

        let counts = FrameCounts {
            revision,
            glyphs: self.glyphs.glyph_count(),
            vector_vertices: self.vector_vertex_count() as usize,
        };
        self.header = self.layout.header(counts, self.sim.bounds());
        true
    }

    pub fn pair_force(&mut self, a: u32, b: u32, metres_per_unit: f64) -> Result<Vec<f64>, LabError> {
        self.sync();
        let force = self.sim.pair_force(ChargeId(a), ChargeId(b), metres_per_unit)?;
        let attractive = if force.is_attractive() { 1.0 } else { 0.0 };
        Ok(vec![force.magnitude, attractive])
    }

    pub fn charges_json(&mut self) -> Result<String, LabError> {
        self.sync();
        self.sim.charges_json()
    }

    /// `[running, mode code, field strength (0 to 1), charge magnitude]`
    /// for syncing the UI controls.
    pub fn controls(&mut self) -> Vec<f64> {
        self.sync();
        vec![
            if self.sim.is_running() { 1.0 } else { 0.0 },
            self.sim.mode().code() as f64,
            self.sim.field_strength(),
            self.sim.charge_magnitude(),
        ]
    }

    pub fn frame_json(&mut self) -> Result<String, LabError> {
        self.sync();
        Ok(serde_json::to_string(self.sim.frame())?)
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn glyphs_ptr(&self) -> *const f32 {
        self.glyphs.glyphs_ptr()
    }

    pub fn glyph_count(&self) -> u32 {
        self.glyphs.glyph_count() as u32
    }

    #[cfg(feature = "vectors")]
    pub fn vectors_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    #[cfg(not(feature = "vectors"))]
    pub fn vectors_ptr(&self) -> *const f32 {
        std::ptr::null()
    }

    #[cfg(feature = "vectors")]
    pub fn vector_vertex_count(&self) -> u32 {
        self.vectors.vertex_count() as u32
    }

    #[cfg(not(feature = "vectors"))]
    pub fn vector_vertex_count(&self) -> u32 {
        0
    }

    pub fn world_width(&self) -> f32 {
        self.sim.bounds().width as f32
    }

    pub fn world_height(&self) -> f32 {
        self.sim.bounds().height as f32
    }

    // ---- Capacity accessors ----

    pub fn max_glyphs(&self) -> u32 {
        self.layout.max_glyphs as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
