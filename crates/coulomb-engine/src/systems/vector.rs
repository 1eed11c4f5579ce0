//! Lyon-based line rendering for field frames.
//!
//! Tessellates field lines and equipotential contours on the CPU into a flat
//! triangle list (`[x, y, r, g, b, a]` per vertex) that the browser copies
//! out of wasm memory and draws as-is.
//!
//! ```ignore
//! let mut vectors = VectorState::with_capacity(config.max_vector_vertices);
//! vectors.draw_frame(sim.frame());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor,
    VertexBuffers,
};

use crate::api::simulator::FieldFrame;
use crate::api::types::{LineKind, Point};

/// Stroke width of field lines.
pub const FIELD_LINE_WIDTH: f32 = 1.5;
/// Stroke width of equipotential contours.
pub const EQUIPOTENTIAL_WIDTH: f32 = 1.0;
/// Dash and gap length of equipotential contours.
pub const EQUIPOTENTIAL_DASH: (f32, f32) = (3.0, 3.0);

/// Per-vertex data for line rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color for vector drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// #42a5f5
    pub const FIELD_LINE: Self = Self::new(66.0 / 255.0, 165.0 / 255.0, 245.0 / 255.0, 1.0);
    /// #9c27b0
    pub const EQUIPOTENTIAL: Self = Self::new(156.0 / 255.0, 39.0 / 255.0, 176.0 / 255.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

impl Default for VectorColor {
    fn default() -> Self {
        Self::WHITE
    }
}

struct StrokeVertexCtor {
    color: VectorColor,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        vertex_at(p.x, p.y, self.color)
    }
}

fn vertex_at(x: f32, y: f32, color: VectorColor) -> VectorVertex {
    VectorVertex { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
}

/// Split an open polyline into dashes of length `on` separated by gaps of
/// length `off`, measured along the path. The pattern carries across
/// vertices, as a canvas line dash does.
pub fn dash_polyline(points: &[Vec2], on: f32, off: f32) -> Vec<Vec<Vec2>> {
    let mut dashes = Vec::new();
    if points.len() < 2 || on <= 0.0 {
        return dashes;
    }
    let off = off.max(0.0);

    let mut drawing = true;
    let mut remaining = on;
    let mut current = vec![points[0]];

    for pair in points.windows(2) {
        let (mut from, to) = (pair[0], pair[1]);
        let mut seg_len = from.distance(to);
        while seg_len > 0.0 {
            if seg_len < remaining {
                remaining -= seg_len;
                if drawing {
                    current.push(to);
                }
                break;
            }
            let cut = from + (to - from) * (remaining / seg_len);
            seg_len -= remaining;
            from = cut;
            if drawing {
                current.push(cut);
                dashes.push(std::mem::take(&mut current));
                remaining = off;
            } else {
                current.push(cut);
                remaining = on;
            }
            drawing = !drawing;
            if remaining <= 0.0 {
                // Zero-length gap: next dash starts right here.
                drawing = true;
                remaining = on;
            }
        }
    }

    if drawing && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}

/// Tessellators plus the flat output buffer. Cleared and refilled per frame.
pub struct VectorState {
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    max_vertices: usize,
    truncated: bool,
}

impl VectorState {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// A state whose buffer never grows beyond `max_vertices` vertices.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * VectorVertex::FLOATS),
            max_vertices,
            truncated: false,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.truncated = false;
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Append tessellated triangles; whole triangles past capacity are dropped.
    fn flush_geometry(&mut self) {
        let free = self.max_vertices.saturating_sub(self.vertex_count());
        let fit = self.geometry.indices.len().min(free) / 3 * 3;
        if fit < self.geometry.indices.len() {
            self.truncated = true;
        }
        for idx in &self.geometry.indices[..fit] {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Stroke an open polyline.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: VectorColor) {
        if points.len() < 2 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Stroke an open polyline with a dash pattern.
    pub fn stroke_dashed_polyline(
        &mut self,
        points: &[Vec2],
        width: f32,
        dash: (f32, f32),
        color: VectorColor,
    ) {
        for segment in dash_polyline(points, dash.0, dash.1) {
            self.stroke_polyline(&segment, width, color);
        }
    }

    pub fn stroke_path(&mut self, path: &Path, width: f32, color: VectorColor) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );
        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Clear, then draw every polyline in the frame in its line style.
    pub fn draw_frame(&mut self, frame: &FieldFrame) {
        self.clear();
        let mut points = Vec::new();
        for line in &frame.lines {
            points.clear();
            points.extend(line.points.iter().map(to_vec2));
            match line.kind {
                LineKind::FieldLine => {
                    self.stroke_polyline(&points, FIELD_LINE_WIDTH, VectorColor::FIELD_LINE)
                }
                LineKind::Equipotential { .. } => self.stroke_dashed_polyline(
                    &points,
                    EQUIPOTENTIAL_WIDTH,
                    EQUIPOTENTIAL_DASH,
                    VectorColor::EQUIPOTENTIAL,
                ),
            }
        }
        if self.truncated {
            log::warn!(
                "line buffer full at {} vertices; frame {} truncated",
                self.max_vertices,
                frame.revision
            );
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

fn to_vec2(p: &Point) -> Vec2 {
    p.as_vec2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Polyline;
    use glam::DVec2;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn line_colors() {
        let c = VectorColor::FIELD_LINE;
        assert!((c.r - 66.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 245.0 / 255.0).abs() < 1e-6);
        assert_eq!(VectorColor::rgb8(0x9c, 0x27, 0xb0), VectorColor::EQUIPOTENTIAL);
    }

    #[test]
    fn dashes_follow_pattern() {
        let line = [Vec2::ZERO, Vec2::new(15.0, 0.0)];
        let dashes = dash_polyline(&line, 3.0, 3.0);
        // 0-3, 6-9, 12-15
        assert_eq!(dashes.len(), 3);
        assert_eq!(dashes[1][0], Vec2::new(6.0, 0.0));
        assert_eq!(dashes[1][1], Vec2::new(9.0, 0.0));
    }

    #[test]
    fn dash_carries_across_vertices() {
        let line = [Vec2::ZERO, Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0)];
        let dashes = dash_polyline(&line, 3.0, 3.0);
        assert_eq!(dashes.len(), 1);
        assert_eq!(dashes[0], vec![Vec2::ZERO, Vec2::new(2.0, 0.0), Vec2::new(2.0, 1.0)]);
    }

    #[test]
    fn degenerate_lines_produce_nothing() {
        let mut state = VectorState::new();
        state.stroke_polyline(&[Vec2::ZERO], 1.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 0);
        assert!(dash_polyline(&[Vec2::ZERO], 3.0, 3.0).is_empty());
    }

    #[test]
    fn draw_frame_strokes_both_kinds() {
        let frame = FieldFrame {
            revision: 1,
            lines: vec![
                Polyline::new(LineKind::FieldLine, vec![DVec2::ZERO, DVec2::new(50.0, 0.0)]),
                Polyline::new(
                    LineKind::Equipotential { level: 10.0 },
                    vec![DVec2::new(0.0, 20.0), DVec2::new(30.0, 20.0), DVec2::new(60.0, 20.0)],
                ),
            ],
        };
        let mut state = VectorState::new();
        state.draw_frame(&frame);
        assert!(state.vertex_count() > 0);
        assert_eq!(state.vertex_count() % 3, 0);
        assert!((state.buffer[2] - VectorColor::FIELD_LINE.r).abs() < 1e-6);

        state.draw_frame(&FieldFrame::default());
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn capacity_truncates_whole_triangles() {
        let mut state = VectorState::with_capacity(4);
        let zigzag = [Vec2::ZERO, Vec2::new(40.0, 30.0), Vec2::new(80.0, 0.0)];
        state.stroke_polyline(&zigzag, 2.0, VectorColor::WHITE);
        assert_eq!(state.vertex_count(), 3);
        assert!(state.truncated);
        state.clear();
        assert!(!state.truncated);
    }
}
