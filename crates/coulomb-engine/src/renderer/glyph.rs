use bytemuck::{Pod, Zeroable};

use crate::core::charge::{Charge, ChargeSign};
use crate::physics::constants::GLYPH_HALF_SIZE;

/// Per-charge render data for the glyph pass.
/// Written to SharedArrayBuffer for the TypeScript canvas renderer.
/// 8 floats = 32 bytes per glyph.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ChargeGlyph {
    /// Glyph center in canvas units.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// +1.0 or -1.0; the renderer draws "+" or "−" from it.
    pub sign: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ChargeGlyph {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    const POSITIVE_RGB: [f32; 3] = [0.898, 0.224, 0.208];
    const NEGATIVE_RGB: [f32; 3] = [0.118, 0.533, 0.898];

    pub fn from_charge(charge: &Charge) -> Self {
        let center = charge.center();
        let [r, g, b] = match charge.sign() {
            ChargeSign::Positive => Self::POSITIVE_RGB,
            ChargeSign::Negative => Self::NEGATIVE_RGB,
        };
        Self {
            x: center.x as f32,
            y: center.y as f32,
            radius: GLYPH_HALF_SIZE as f32,
            sign: charge.sign().factor() as f32,
            r,
            g,
            b,
            a: 1.0,
        }
    }
}

/// Buffer of charge glyphs, rebuilt whenever the charge set changes.
pub struct GlyphBuffer {
    glyphs: Vec<ChargeGlyph>,
}

impl GlyphBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            glyphs: Vec::with_capacity(max),
        }
    }

    /// Replace the contents with one glyph per charge, in draw order.
    pub fn rebuild<'a>(&mut self, charges: impl IntoIterator<Item = &'a Charge>) {
        self.glyphs.clear();
        self.glyphs.extend(charges.into_iter().map(ChargeGlyph::from_charge));
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyphs_ptr(&self) -> *const f32 {
        self.glyphs.as_ptr() as *const f32
    }
}

impl Default for GlyphBuffer {
    fn default() -> Self {
        Self::new()
    }
}
