//! Lyon-based tessellating canvas.
//!
//! Turns the engine's drawing calls into a flat triangle list (6 floats per
//! vertex) that a WebGPU or WebGL host draws over the potential-map texture.
//!
//! # Usage
//!
//! ```ignore
//! let mut canvas = VectorCanvas::new();
//! compose_scene(&charges, &config, &mut canvas)?;
//! upload_texture(canvas.pixels(), canvas.pixel_size());
//! upload_vertices(canvas.vertex_floats());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::canvas::{Arrowhead, Canvas};
use super::color::Color;
use crate::core::viewport::Viewport;

const TOLERANCE: f32 = 0.25;
const OUTLINE_WIDTH: f32 = 1.0;

/// Per-vertex data: position then straight RGBA. 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
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

    fn at(pos: lyon::math::Point, color: Color) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        }
    }
}

struct Ctor(Color);

impl FillVertexConstructor<VectorVertex> for Ctor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.0)
    }
}

impl StrokeVertexConstructor<VectorVertex> for Ctor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position(), self.0)
    }
}

/// Canvas that tessellates vector calls and keeps the latest pixel buffer.
pub struct VectorCanvas {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
    pixels: Vec<u8>,
    pixel_size: (u32, u32),
}

impl VectorCanvas {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
            pixels: Vec::new(),
            pixel_size: (0, 0),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        &self.vertices
    }

    /// Vertices as a flat float slice, `FLOATS` per vertex.
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// RGBA8 buffer from the last `put_pixels`.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixel_size
    }

    /// Expand indexed geometry into the triangle list.
    fn flush_geometry(&mut self) {
        let VertexBuffers { vertices, indices } = &self.geometry;
        self.vertices
            .extend(indices.iter().map(|&i| vertices[i as usize]));
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(TOLERANCE),
            &mut BuffersBuilder::new(&mut self.geometry, Ctor(color)),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::warn!("fill tessellation failed: {:?}", e),
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(TOLERANCE).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, Ctor(color)),
        );
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => log::warn!("stroke tessellation failed: {:?}", e),
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false);
        self.stroke_path(&builder.build(), width, color);
    }
}

impl Default for VectorCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for VectorCanvas {
    fn clear(&mut self, viewport: Viewport) {
        self.vertices.clear();
        self.pixels.clear();
        self.pixels.resize(viewport.pixel_count() * 4, 0);
        self.pixel_size = (viewport.width(), viewport.height());
    }

    fn put_pixels(&mut self, width: u32, height: u32, rgba: &[u8]) {
        self.pixels.clear();
        self.pixels.extend_from_slice(rgba);
        self.pixel_size = (width, height);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, outline: Color) {
        if radius <= 0.0 {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();
        self.fill_path(&path, fill);
        self.stroke_path(&path, OUTLINE_WIDTH, outline);
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.stroke_polyline(&[from, to], width, color);
    }

    fn stroke_arrowhead(&mut self, head: &Arrowhead, width: f32, color: Color) {
        self.stroke_polyline(&[head.left, head.tip, head.right], width, color);
    }
}
