use std::f64::consts::TAU;

use crate::coords::Vec2;
use crate::surface::{DrawSurface, Primitive};

use super::{emit, outline, Style, Styled};

/// Default tessellation of ellipses and circles.
pub const DEFAULT_SEGMENTS: u32 = 50;

/// Generates `segments` points on the ellipse centered at `center`.
///
/// Starts at angle zero (`center + (rx, 0)`) and advances counter-clockwise by
/// `2π / segments` using the rotation recurrence, so `sin`/`cos` are evaluated
/// once per ring. The recurrence runs in `f64` to keep drift negligible.
///
/// Fewer than three segments yield a degenerate ring; zero yields no points.
pub fn ellipse_vertices(center: Vec2, rx: f32, ry: f32, segments: u32) -> Vec<Vec2> {
    if segments == 0 {
        return Vec::new();
    }

    let theta = TAU / segments as f64;
    let (sin_t, cos_t) = theta.sin_cos();
    let (rx, ry) = (rx as f64, ry as f64);
    let (ox, oy) = (center.x as f64, center.y as f64);

    let mut cx = 1.0f64;
    let mut cy = 0.0f64;
    let mut out = Vec::with_capacity(segments as usize);

    for _ in 0..segments {
        out.push(Vec2::new((cx * rx + ox) as f32, (cy * ry + oy) as f32));
        let t = cx;
        cx = cos_t * cx - sin_t * cy;
        cy = sin_t * t + cos_t * cy;
    }

    out
}

/// Ellipse approximated by a `segments`-sided polygon.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipse {
    pub center: Vec2,
    pub rx: f32,
    pub ry: f32,
    pub segments: u32,
    pub style: Style,
}

impl Ellipse {
    #[inline]
    pub fn new(x: f32, y: f32, rx: f32, ry: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            rx,
            ry,
            segments: DEFAULT_SEGMENTS,
            style: Style::default(),
        }
    }

    /// Sets the tessellation. Values below 3 are accepted and produce degenerate output.
    pub fn segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    pub fn vertices(&self) -> Vec<Vec2> {
        ellipse_vertices(self.center, self.rx, self.ry, self.segments)
    }

    /// The fill pass is skipped when no fill is set or its alpha is zero.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let ring = self.vertices();

        if let Some(fill) = self.style.fill.filter(|c| !c.is_transparent()) {
            surface.set_color(fill.ratios());
            emit(surface, Primitive::Polygon, &ring);
        }

        if let Some(stroke) = self.style.stroke {
            outline(surface, &ring, stroke, self.style.stroke_weight);
        }
    }
}

impl Styled for Ellipse {
    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

/// Circle: an [`Ellipse`] with both radii equal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub segments: u32,
    pub style: Style,
}

impl Circle {
    #[inline]
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
            segments: DEFAULT_SEGMENTS,
            style: Style::default(),
        }
    }

    pub fn segments(mut self, segments: u32) -> Self {
        self.segments = segments;
        self
    }

    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        Ellipse::from(*self).draw(surface);
    }
}

impl From<Circle> for Ellipse {
    fn from(c: Circle) -> Self {
        Ellipse {
            center: c.center,
            rx: c.radius,
            ry: c.radius,
            segments: c.segments,
            style: c.style,
        }
    }
}

impl Styled for Circle {
    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}
