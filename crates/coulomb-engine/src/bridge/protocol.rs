/// Frame buffer layout shared with the browser.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Glyphs: max_glyphs × 8 floats]
/// [Vectors: max_vector_vertices × 6 floats]
/// ```
///
/// Capacities are written into the header every frame, so TypeScript can
/// compute offsets without knowing the configuration.

use crate::api::config::SimConfig;
use crate::api::types::Bounds;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_REVISION: usize = 1;
pub const HEADER_MAX_GLYPHS: usize = 2;
pub const HEADER_GLYPH_COUNT: usize = 3;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 4;
pub const HEADER_VECTOR_VERTEX_COUNT: usize = 5;
pub const HEADER_WORLD_WIDTH: usize = 6;
pub const HEADER_WORLD_HEIGHT: usize = 7;

/// The header revision counts modulo this. Integers below 2^24 are exact in
/// f32, so the value keeps changing from frame to frame.
pub const REVISION_WRAP: u64 = 1 << 24;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per charge glyph: x, y, radius, sign, r, g, b, a.
pub const GLYPH_FLOATS: usize = 8;

/// Floats per vector vertex: x, y, r, g, b, a.
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Counts describing one produced frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameCounts {
    pub revision: u64,
    pub glyphs: usize,
    pub vector_vertices: usize,
}

/// Buffer layout computed from capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_glyphs: usize,
    pub max_vector_vertices: usize,

    pub glyph_data_floats: usize,
    pub vector_data_floats: usize,

    /// Offset (in floats) where glyph data begins.
    pub glyph_data_offset: usize,
    /// Offset (in floats) where vector data begins.
    pub vector_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_glyphs: usize, max_vector_vertices: usize) -> Self {
        let glyph_data_floats = max_glyphs * GLYPH_FLOATS;
        let vector_data_floats = max_vector_vertices * VECTOR_VERTEX_FLOATS;

        let glyph_data_offset = HEADER_FLOATS;
        let vector_data_offset = glyph_data_offset + glyph_data_floats;
        let buffer_total_floats = vector_data_offset + vector_data_floats;

        Self {
            max_glyphs,
            max_vector_vertices,
            glyph_data_floats,
            vector_data_floats,
            glyph_data_offset,
            vector_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// One glyph slot per allowed charge.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.max_charges, config.max_vector_vertices)
    }

    /// Header for a frame. Counts above capacity are clamped so the reader
    /// never runs past its section.
    pub fn header(&self, counts: FrameCounts, bounds: Bounds) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_REVISION] = (counts.revision % REVISION_WRAP) as f32;
        header[HEADER_MAX_GLYPHS] = self.max_glyphs as f32;
        header[HEADER_GLYPH_COUNT] = counts.glyphs.min(self.max_glyphs) as f32;
        header[HEADER_MAX_VECTOR_VERTICES] = self.max_vector_vertices as f32;
        header[HEADER_VECTOR_VERTEX_COUNT] = counts.vector_vertices.min(self.max_vector_vertices) as f32;
        header[HEADER_WORLD_WIDTH] = bounds.width as f32;
        header[HEADER_WORLD_HEIGHT] = bounds.height as f32;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config() {
        let layout = ProtocolLayout::from_config(&SimConfig::default());
        assert_eq!(layout.max_glyphs, 64);
        assert_eq!(layout.max_vector_vertices, 65536);
        assert_eq!(layout.glyph_data_offset, 8);
        assert_eq!(layout.vector_data_offset, 8 + 64 * 8);
        assert_eq!(layout.buffer_total_floats, 8 + 64 * 8 + 65536 * 6);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 300);
        assert_eq!(layout.glyph_data_offset, HEADER_FLOATS);
        assert_eq!(layout.vector_data_offset, layout.glyph_data_offset + layout.glyph_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.vector_data_offset + layout.vector_data_floats);
    }

    #[test]
    fn header_clamps_counts() {
        let layout = ProtocolLayout::new(2, 30);
        let counts = FrameCounts { revision: 7, glyphs: 5, vector_vertices: 12 };
        let header = layout.header(counts, Bounds::new(800.0, 450.0));
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_FRAME_REVISION], 7.0);
        assert_eq!(header[HEADER_GLYPH_COUNT], 2.0);
        assert_eq!(header[HEADER_VECTOR_VERTEX_COUNT], 12.0);
        assert_eq!(header[HEADER_WORLD_HEIGHT], 450.0);
    }

    #[test]
    fn header_revision_wraps_exactly() {
        let layout = ProtocolLayout::new(2, 30);
        let bounds = Bounds::new(800.0, 450.0);
        let at = |revision| layout.header(FrameCounts { revision, ..FrameCounts::default() }, bounds);

        let before = at(REVISION_WRAP - 1)[HEADER_FRAME_REVISION];
        let wrapped = at(REVISION_WRAP)[HEADER_FRAME_REVISION];
        let after = at(REVISION_WRAP + 1)[HEADER_FRAME_REVISION];
        assert_eq!(before, 16_777_215.0);
        assert_eq!(wrapped, 0.0);
        assert_eq!(after, 1.0);
        assert_ne!(at(3 * REVISION_WRAP + 7)[HEADER_FRAME_REVISION], at(3 * REVISION_WRAP + 8)[HEADER_FRAME_REVISION]);
    }
}
