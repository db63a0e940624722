use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Ortho, Vec2, Viewport};
use crate::paint::Ratio;
use crate::surface::{Blend, ClearMask, DrawSurface, Primitive};

use super::tessellate;

/// Vertex as uploaded to the GPU: NDC position plus straight-alpha color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Consecutive vertices sharing blend mode and viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRun {
    pub blend: Blend,
    pub viewport: Viewport,
    pub vertices: Range<u32>,
}

/// CPU side of the immediate renderer.
///
/// Tracks the immediate-mode state and turns finished primitives into
/// projected triangles grouped into [`DrawRun`]s. A primitive is drawn in the
/// color current when it ends. Only the color buffer exists; depth clears
/// are accepted and ignored.
#[derive(Debug)]
pub struct FrameBatch {
    viewport: Viewport,
    projection: Ortho,
    blend: Blend,
    color: [Ratio; 4],
    line_width: f32,
    clear_color: [Ratio; 4],

    clear: Option<[Ratio; 4]>,
    open: Option<Primitive>,
    points: Vec<Vec2>,
    scratch: Vec<Vec2>,

    vertices: Vec<ColorVertex>,
    runs: Vec<DrawRun>,
}

impl Default for FrameBatch {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            projection: Ortho::default(),
            blend: Blend::Replace,
            color: [1.0; 4],
            line_width: 1.0,
            clear_color: [0.0; 4],
            clear: None,
            open: None,
            points: Vec::new(),
            scratch: Vec::new(),
            vertices: Vec::new(),
            runs: Vec::new(),
        }
    }
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertices(&self) -> &[ColorVertex] {
        &self.vertices
    }

    #[inline]
    pub fn runs(&self) -> &[DrawRun] {
        &self.runs
    }

    /// Color the frame was last cleared to, if it was cleared.
    #[inline]
    pub fn clear_request(&self) -> Option<[Ratio; 4]> {
        self.clear
    }

    pub fn is_empty(&self) -> bool {
        self.clear.is_none() && self.runs.is_empty()
    }

    /// Drops the recorded frame. Drawing state (color, blend, projection) persists.
    pub fn reset_frame(&mut self) {
        self.clear = None;
        self.vertices.clear();
        self.runs.clear();
    }

    fn push_triangles(&mut self) {
        if self.scratch.is_empty() {
            return;
        }
        if !self.viewport.is_valid() {
            self.scratch.clear();
            return;
        }

        let start = self.vertices.len() as u32;
        let color = self.color;
        let projection = self.projection;
        self.vertices.extend(self.scratch.drain(..).map(|p| ColorVertex {
            pos: projection.to_ndc(p),
            color,
        }));
        let end = self.vertices.len() as u32;

        match self.runs.last_mut() {
            Some(run)
                if run.blend == self.blend
                    && run.viewport == self.viewport
                    && run.vertices.end == start =>
            {
                run.vertices.end = end;
            }
            _ => self.runs.push(DrawRun {
                blend: self.blend,
                viewport: self.viewport,
                vertices: start..end,
            }),
        }
    }
}

impl DrawSurface for FrameBatch {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // No model-view transforms exist, so identity is the only state.
    fn load_identity(&mut self) {}

    fn set_projection(&mut self, projection: Ortho) {
        self.projection = projection;
    }

    fn set_clear_color(&mut self, color: [Ratio; 4]) {
        self.clear_color = color;
    }

    fn clear(&mut self, mask: ClearMask) {
        if mask.color {
            // Everything drawn so far would be overwritten.
            self.vertices.clear();
            self.runs.clear();
            self.clear = Some(self.clear_color);
        }
    }

    fn set_blend(&mut self, blend: Blend) {
        self.blend = blend;
    }

    fn set_color(&mut self, color: [Ratio; 4]) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn begin(&mut self, primitive: Primitive) {
        if let Some(open) = self.open {
            log::warn!("begin({primitive:?}) while {open:?} is open; discarding it");
        }
        self.open = Some(primitive);
        self.points.clear();
    }

    fn vertex(&mut self, x: f32, y: f32) {
        // Outside begin/end a vertex has no effect.
        if self.open.is_some() {
            self.points.push(Vec2::new(x, y));
        }
    }

    fn end(&mut self) {
        let Some(primitive) = self.open.take() else {
            log::warn!("end() without begin()");
            return;
        };

        self.scratch.clear();
        match primitive {
            Primitive::Polygon => tessellate::fan(&self.points, &mut self.scratch),
            Primitive::LineLoop => {
                tessellate::line_loop(&self.points, self.line_width, &mut self.scratch)
            }
        }
        self.points.clear();
        self.push_triangles();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_batch(w: u32, h: u32) -> FrameBatch {
        let mut b = FrameBatch::new();
        b.set_viewport(Viewport::full(w, h));
        b.set_projection(Ortho::canvas(w as f32, h as f32));
        b.set_blend(Blend::Alpha);
        b
    }

    fn quad(b: &mut FrameBatch) {
        b.begin(Primitive::Polygon);
        b.vertex(0.0, 0.0);
        b.vertex(100.0, 0.0);
        b.vertex(100.0, 100.0);
        b.vertex(0.0, 100.0);
        b.end();
    }

    #[test]
    fn polygon_is_projected_to_ndc() {
        let mut b = canvas_batch(100, 100);
        b.set_color([1.0, 0.0, 0.0, 1.0]);
        quad(&mut b);

        assert_eq!(b.vertices().len(), 6);
        assert_eq!(b.vertices()[0].pos, [-1.0, -1.0]);
        assert_eq!(b.vertices()[2].pos, [1.0, 1.0]);
        assert!(b.vertices().iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
        assert_eq!(b.runs().len(), 1);
        assert_eq!(b.runs()[0].vertices, 0..6);
    }

    #[test]
    fn primitive_takes_color_current_at_end() {
        let red = [1.0, 0.0, 0.0, 1.0];
        let green = [0.0, 1.0, 0.0, 1.0];
        let mut b = canvas_batch(100, 100);
        b.set_color(red);
        b.begin(Primitive::Polygon);
        b.vertex(0.0, 0.0);
        b.vertex(100.0, 0.0);
        b.set_color(green);
        b.vertex(100.0, 100.0);
        b.end();

        assert_eq!(b.vertices().len(), 3);
        assert!(b.vertices().iter().all(|v| v.color == green));
    }

    #[test]
    fn runs_split_on_blend_change() {
        let mut b = canvas_batch(100, 100);
        quad(&mut b);
        quad(&mut b);
        b.set_blend(Blend::Replace);
        quad(&mut b);

        let runs = b.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].vertices, 0..12);
        assert_eq!(runs[1].blend, Blend::Replace);
        assert_eq!(runs[1].vertices, 12..18);
    }

    #[test]
    fn clear_discards_earlier_geometry() {
        let mut b = canvas_batch(10, 10);
        quad(&mut b);
        b.set_clear_color([0.2, 0.2, 0.2, 1.0]);
        b.clear(ClearMask::COLOR_DEPTH);

        assert!(b.vertices().is_empty());
        assert_eq!(b.clear_request(), Some([0.2, 0.2, 0.2, 1.0]));
    }

    #[test]
    fn line_loop_uses_current_width() {
        let mut b = canvas_batch(100, 100);
        b.set_line_width(4.0);
        b.begin(Primitive::LineLoop);
        b.vertex(0.0, 50.0);
        b.vertex(100.0, 50.0);
        b.end();

        // Half-width of 2px on a 100px canvas is 0.04 in NDC.
        let ys: Vec<f32> = b.vertices().iter().map(|v| v.pos[1]).collect();
        assert!(ys.iter().all(|y| (y.abs() - 0.04).abs() < 1e-5));
    }

    #[test]
    fn invalid_viewport_draws_nothing() {
        let mut b = FrameBatch::new();
        quad(&mut b);
        assert!(b.vertices().is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn stray_vertices_and_ends_are_ignored() {
        let mut b = canvas_batch(10, 10);
        b.vertex(1.0, 1.0);
        b.end();
        assert!(b.runs().is_empty());
    }

    #[test]
    fn reset_keeps_state() {
        let mut b = canvas_batch(100, 100);
        b.set_color([0.0, 1.0, 0.0, 1.0]);
        b.clear(ClearMask::COLOR);
        quad(&mut b);
        b.reset_frame();
        assert!(b.is_empty());

        quad(&mut b);
        assert_eq!(b.vertices()[0].color, [0.0, 1.0, 0.0, 1.0]);
    }
}
