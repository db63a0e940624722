//! Immediate-mode drawing capability.
//!
//! Shapes and the canvas talk to a [`DrawSurface`] instead of a global GL
//! function table, so the real wgpu renderer and the recording fake used in
//! tests are interchangeable.
//!
//! State set through the surface (color, line width) persists until changed;
//! nothing is restored after a shape is drawn.

pub mod recording;

use crate::coords::{Ortho, Viewport};
use crate::paint::Ratio;

pub use recording::{DrawCall, RecordingSurface};

/// Kind of primitive assembled between [`DrawSurface::begin`] and [`DrawSurface::end`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    /// Filled convex polygon through all vertices.
    Polygon,
    /// Closed outline connecting each vertex to the next and the last to the first.
    LineLoop,
}

/// Buffers affected by [`DrawSurface::clear`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ClearMask {
    pub color: bool,
    pub depth: bool,
}

impl ClearMask {
    pub const COLOR: ClearMask = ClearMask { color: true, depth: false };
    pub const COLOR_DEPTH: ClearMask = ClearMask { color: true, depth: true };
}

/// Framebuffer blending applied to subsequent draws.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Blend {
    /// `src * src_alpha + dst * (1 - src_alpha)`.
    #[default]
    Alpha,
    /// Source overwrites destination.
    Replace,
}

/// Immediate-mode 2D drawing contract.
pub trait DrawSurface {
    fn set_viewport(&mut self, viewport: Viewport);

    /// Resets the model-view transform.
    fn load_identity(&mut self);

    fn set_projection(&mut self, projection: Ortho);

    fn set_clear_color(&mut self, color: [Ratio; 4]);

    fn clear(&mut self, mask: ClearMask);

    fn set_blend(&mut self, blend: Blend);

    /// Selects the color used by following vertices.
    fn set_color(&mut self, color: [Ratio; 4]);

    /// Width in pixels of following `LineLoop` primitives.
    fn set_line_width(&mut self, width: f32);

    fn begin(&mut self, primitive: Primitive);

    fn vertex(&mut self, x: f32, y: f32);

    fn end(&mut self);
}

