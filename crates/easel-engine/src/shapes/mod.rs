//! Drawable primitives.
//!
//! Shapes are plain values. Nothing is drawn until [`Shape::draw`] (or the
//! per-shape `draw`) is called with a [`DrawSurface`]; no shape is retained
//! after that call.
//!
//! Extending the set:
//! - add a module under `shapes::*` with the value type and its `draw`
//! - add a variant to [`Shape`] and a `From` impl

mod ellipse;
mod line;
mod rect;

use crate::coords::Vec2;
use crate::paint::Color;
use crate::surface::{DrawSurface, Primitive};

pub use ellipse::{ellipse_vertices, Circle, Ellipse, DEFAULT_SEGMENTS};
pub use line::{outline, Line};
pub use rect::Rect;

/// Fill and stroke passes shared by closed shapes.
///
/// `None` means "skip that pass". The default fill is fully transparent and
/// there is no default stroke.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_weight: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::TRANSPARENT),
            stroke: None,
            stroke_weight: 1.0,
        }
    }
}

impl Style {
    /// Returns `weight` if it is usable as a line width, otherwise `current`.
    pub(crate) fn checked_weight(current: f32, weight: f32) -> f32 {
        if weight > 0.0 && weight.is_finite() {
            weight
        } else {
            log::warn!("ignoring stroke weight {weight}; keeping {current}");
            current
        }
    }
}

/// Builder methods for shapes carrying a [`Style`].
pub trait Styled: Sized {
    fn style(&self) -> &Style;
    fn style_mut(&mut self) -> &mut Style;

    fn fill(mut self, color: impl Into<Color>) -> Self {
        self.style_mut().fill = Some(color.into());
        self
    }

    fn no_fill(mut self) -> Self {
        self.style_mut().fill = None;
        self
    }

    fn stroke(mut self, color: impl Into<Color>) -> Self {
        self.style_mut().stroke = Some(color.into());
        self
    }

    fn no_stroke(mut self) -> Self {
        self.style_mut().stroke = None;
        self
    }

    /// Sets the outline width. Non-positive or non-finite widths are ignored.
    fn stroke_weight(mut self, weight: f32) -> Self {
        let style = self.style_mut();
        style.stroke_weight = Style::checked_weight(style.stroke_weight, weight);
        self
    }

    fn with_style(mut self, style: Style) -> Self {
        *self.style_mut() = style;
        self
    }
}

/// Closed set of drawable primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Rect(Rect),
    Ellipse(Ellipse),
    Circle(Circle),
}

impl Shape {
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        match self {
            Shape::Line(line) => line.draw(surface),
            Shape::Rect(rect) => rect.draw(surface),
            Shape::Ellipse(ellipse) => ellipse.draw(surface),
            Shape::Circle(circle) => circle.draw(surface),
        }
    }
}

impl From<Line> for Shape {
    fn from(v: Line) -> Self {
        Shape::Line(v)
    }
}

impl From<Rect> for Shape {
    fn from(v: Rect) -> Self {
        Shape::Rect(v)
    }
}

impl From<Ellipse> for Shape {
    fn from(v: Ellipse) -> Self {
        Shape::Ellipse(v)
    }
}

impl From<Circle> for Shape {
    fn from(v: Circle) -> Self {
        Shape::Circle(v)
    }
}

/// Emits one `begin .. end` block through `vertices`.
fn emit<S: DrawSurface + ?Sized>(surface: &mut S, primitive: Primitive, vertices: &[Vec2]) {
    surface.begin(primitive);
    for v in vertices {
        surface.vertex(v.x, v.y);
    }
    surface.end();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn default_style_is_transparent_fill_without_stroke() {
        let s = Style::default();
        assert_eq!(s.fill, Some(Color::TRANSPARENT));
        assert_eq!(s.stroke, None);
        assert_eq!(s.stroke_weight, 1.0);
    }

    #[test]
    fn invalid_stroke_weight_is_ignored() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0).stroke_weight(3.0).stroke_weight(0.0);
        assert_eq!(r.style().stroke_weight, 3.0);
        let r = r.stroke_weight(f32::NAN).stroke_weight(-2.0);
        assert_eq!(r.style().stroke_weight, 3.0);
    }

    #[test]
    fn shape_dispatch_matches_direct_draw() {
        let circle = Circle::new(5.0, 5.0, 2.0).fill(Color::BLACK).stroke(200);

        let mut direct = RecordingSurface::new();
        circle.draw(&mut direct);

        let mut dispatched = RecordingSurface::new();
        Shape::from(circle).draw(&mut dispatched);

        assert_eq!(direct.calls(), dispatched.calls());
    }

    #[test]
    fn shapes_are_comparable_values() {
        let a = Shape::from(Line::new(0.0, 0.0, 1.0, 1.0).stroke(10));
        let b = Shape::from(Line::new(0.0, 0.0, 1.0, 1.0).stroke(10));
        assert_eq!(a, b);
        assert_ne!(a, Shape::from(Line::new(0.0, 0.0, 1.0, 2.0).stroke(10)));
    }
}
