use crate::coords::Vec2;
use crate::surface::{DrawSurface, Primitive};

use super::{emit, outline, Style, Styled};

/// Axis-aligned rectangle anchored at its origin corner.
///
/// With the canvas' default projection the origin is the bottom-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
    pub style: Style,
}

impl Rect {
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            width,
            height,
            style: Style::default(),
        }
    }

    /// Corners in drawing order: origin, +width, +width+height, +height.
    pub fn corners(&self) -> [Vec2; 4] {
        let Vec2 { x, y } = self.origin;
        [
            Vec2::new(x, y),
            Vec2::new(x + self.width, y),
            Vec2::new(x + self.width, y + self.height),
            Vec2::new(x, y + self.height),
        ]
    }

    /// The polygon pass is always emitted; a fill color is only selected when set.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let corners = self.corners();

        if let Some(fill) = self.style.fill {
            surface.set_color(fill.ratios());
        }
        emit(surface, Primitive::Polygon, &corners);

        if let Some(stroke) = self.style.stroke {
            outline(surface, &corners, stroke, self.style.stroke_weight);
        }
    }
}

impl Styled for Rect {
    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}
