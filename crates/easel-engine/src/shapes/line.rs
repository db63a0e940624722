use crate::coords::Vec2;
use crate::paint::Color;
use crate::surface::{DrawSurface, Primitive};

use super::{emit, Style};

/// Straight segment from `start` to `end`.
///
/// A line has no fill pass; without a stroke color it is invisible.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
    pub start: Vec2,
    pub end: Vec2,
    pub stroke: Option<Color>,
    pub stroke_weight: f32,
}

impl Line {
    #[inline]
    pub fn new(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self::between(Vec2::new(x, y), Vec2::new(dx, dy))
    }

    #[inline]
    pub fn between(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            stroke: None,
            stroke_weight: 1.0,
        }
    }

    pub fn stroke(mut self, color: impl Into<Color>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    pub fn no_stroke(mut self) -> Self {
        self.stroke = None;
        self
    }

    /// Sets the line width. Non-positive or non-finite widths are ignored.
    pub fn stroke_weight(mut self, weight: f32) -> Self {
        self.stroke_weight = Style::checked_weight(self.stroke_weight, weight);
        self
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let Some(stroke) = self.stroke else { return };

        surface.set_color(stroke.ratios());
        surface.set_line_width(self.stroke_weight);
        emit(surface, Primitive::LineLoop, &[self.start, self.end]);
    }
}

/// Draws a closed outline through `vertices` as a single line loop.
///
/// Selects `stroke` and `weight` on the surface; neither is restored.
pub fn outline<S: DrawSurface + ?Sized>(
    surface: &mut S,
    vertices: &[Vec2],
    stroke: Color,
    weight: f32,
) {
    surface.set_color(stroke.ratios());
    surface.set_line_width(weight);
    emit(surface, Primitive::LineLoop, vertices);
}
