/// Pixel rectangle of the framebuffer that drawing is mapped onto.
///
/// Follows the GL convention: `(x, y)` is the bottom-left corner.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering a whole `width` x `height` framebuffer.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Converts to a top-left-origin rect `(x, y, w, h)` inside a framebuffer of
    /// height `fb_height`, as expected by APIs with +Y down.
    pub fn to_top_left(self, fb_height: u32) -> (f32, f32, f32, f32) {
        let top = fb_height as f32 - (self.y as f32 + self.height as f32);
        (self.x as f32, top, self.width as f32, self.height as f32)
    }
}
