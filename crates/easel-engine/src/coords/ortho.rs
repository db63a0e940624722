use super::Vec2;

/// Orthographic projection volume, in the argument order of `glOrtho`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ortho {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Ortho {
    #[inline]
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self { left, right, bottom, top, near, far }
    }

    /// Flat 2D mapping of `(0, width) x (0, height)`, origin bottom-left, +Y up.
    #[inline]
    pub const fn canvas(width: f32, height: f32) -> Self {
        Self::new(0.0, width, 0.0, height, 0.0, 1.0)
    }

    /// Maps a point to normalized device coordinates (`-1..1` on both axes, +Y up).
    ///
    /// Degenerate volumes map everything to the origin.
    pub fn to_ndc(&self, p: Vec2) -> [f32; 2] {
        let w = self.right - self.left;
        let h = self.top - self.bottom;
        if w == 0.0 || h == 0.0 {
            return [0.0, 0.0];
        }
        [
            2.0 * (p.x - self.left) / w - 1.0,
            2.0 * (p.y - self.bottom) / h - 1.0,
        ]
    }
}

impl Default for Ortho {
    /// Identity mapping: NDC in, NDC out.
    fn default() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0)
    }
}
