use crate::coords::{Ortho, Vec2, Viewport};
use crate::paint::Ratio;

use super::{Blend, ClearMask, DrawSurface, Primitive};

/// One recorded [`DrawSurface`] call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawCall {
    Viewport(Viewport),
    LoadIdentity,
    Projection(Ortho),
    ClearColor([Ratio; 4]),
    Clear(ClearMask),
    Blend(Blend),
    Color([Ratio; 4]),
    LineWidth(f32),
    Begin(Primitive),
    Vertex(f32, f32),
    End,
}

/// A primitive reassembled from a `Begin .. End` run of recorded calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPrimitive {
    pub kind: Primitive,
    pub vertices: Vec<Vec2>,
}

/// Surface that draws nothing and remembers every call, in order.
///
/// Used by headless runs and tests to assert exactly what a shape or a frame
/// asked the renderer to do.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Returns the recorded calls and starts over with an empty log.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Groups `Begin .. End` runs into primitives. Unterminated runs are dropped.
    pub fn primitives(&self) -> Vec<RecordedPrimitive> {
        let mut out = Vec::new();
        let mut open: Option<RecordedPrimitive> = None;

        for call in &self.calls {
            match *call {
                DrawCall::Begin(kind) => {
                    open = Some(RecordedPrimitive { kind, vertices: Vec::new() });
                }
                DrawCall::Vertex(x, y) => {
                    if let Some(p) = open.as_mut() {
                        p.vertices.push(Vec2::new(x, y));
                    }
                }
                DrawCall::End => out.extend(open.take()),
                _ => {}
            }
        }

        out
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Colors selected with `set_color`, in order.
    pub fn colors(&self) -> Vec<[Ratio; 4]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Color(rgba) => Some(*rgba),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.calls.push(DrawCall::Viewport(viewport));
    }

    fn load_identity(&mut self) {
        self.calls.push(DrawCall::LoadIdentity);
    }

    fn set_projection(&mut self, projection: Ortho) {
        self.calls.push(DrawCall::Projection(projection));
    }

    fn set_clear_color(&mut self, color: [Ratio; 4]) {
        self.calls.push(DrawCall::ClearColor(color));
    }

    fn clear(&mut self, mask: ClearMask) {
        self.calls.push(DrawCall::Clear(mask));
    }

    fn set_blend(&mut self, blend: Blend) {
        self.calls.push(DrawCall::Blend(blend));
    }

    fn set_color(&mut self, color: [Ratio; 4]) {
        self.calls.push(DrawCall::Color(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(DrawCall::LineWidth(width));
    }

    fn begin(&mut self, primitive: Primitive) {
        self.calls.push(DrawCall::Begin(primitive));
    }

    fn vertex(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::Vertex(x, y));
    }

    fn end(&mut self) {
        self.calls.push(DrawCall::End);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_group_begin_end_runs() {
        let mut s = RecordingSurface::new();
        s.begin(Primitive::Polygon);
        s.vertex(0.0, 0.0);
        s.vertex(1.0, 0.0);
        s.vertex(1.0, 1.0);
        s.end();
        s.set_color([1.0; 4]);
        s.begin(Primitive::LineLoop);
        s.vertex(2.0, 2.0);
        s.end();

        let prims = s.primitives();
        assert_eq!(prims.len(), 2);
        assert_eq!(prims[0].kind, Primitive::Polygon);
        assert_eq!(prims[0].vertices.len(), 3);
        assert_eq!(prims[1].kind, Primitive::LineLoop);
        assert_eq!(prims[1].vertices, vec![Vec2::new(2.0, 2.0)]);
    }

    #[test]
    fn unterminated_run_is_dropped() {
        let mut s = RecordingSurface::new();
        s.begin(Primitive::Polygon);
        s.vertex(0.0, 0.0);
        assert!(s.primitives().is_empty());
    }

    #[test]
    fn take_empties_the_log() {
        let mut s = RecordingSurface::new();
        s.load_identity();
        assert_eq!(s.take(), vec![DrawCall::LoadIdentity]);
        assert!(s.calls().is_empty());
    }
}
