//! Turns immediate-mode primitives into triangle lists.

use crate::coords::Vec2;

/// Fan triangulation of a convex polygon. Fewer than three points yield nothing.
pub fn fan(points: &[Vec2], out: &mut Vec<Vec2>) {
    let Some((&first, rest)) = points.split_first() else { return };
    for pair in rest.windows(2) {
        out.extend_from_slice(&[first, pair[0], pair[1]]);
    }
}

/// Closed outline of `width` pixels centered on each edge.
///
/// Every edge becomes a quad; a two-point loop is a single segment. Zero-length
/// edges are skipped. Joints are not mitered.
pub fn line_loop(points: &[Vec2], width: f32, out: &mut Vec<Vec2>) {
    match points.len() {
        0 | 1 => {}
        2 => segment(points[0], points[1], width, out),
        n => {
            for i in 0..n {
                segment(points[i], points[(i + 1) % n], width, out);
            }
        }
    }
}

fn segment(a: Vec2, b: Vec2, width: f32, out: &mut Vec<Vec2>) {
    let Some(dir) = (b - a).normalized() else { return };
    let offset = dir.perp() * (width * 0.5);

    let (a0, a1) = (a + offset, a - offset);
    let (b0, b1) = (b + offset, b - offset);
    out.extend_from_slice(&[a0, a1, b1, a0, b1, b0]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f32, f32)]) -> Vec<Vec2> {
        raw.iter().copied().map(Vec2::from).collect()
    }

    #[test]
    fn fan_of_quad_is_two_triangles() {
        let quad = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let mut out = Vec::new();
        fan(&quad, &mut out);
        assert_eq!(out, pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0), (1.0, 1.0), (0.0, 1.0)]));
    }

    #[test]
    fn fan_needs_three_points() {
        let mut out = Vec::new();
        fan(&pts(&[(0.0, 0.0), (1.0, 0.0)]), &mut out);
        fan(&[], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn two_point_loop_is_one_segment() {
        let mut out = Vec::new();
        line_loop(&pts(&[(0.0, 0.0), (10.0, 0.0)]), 2.0, &mut out);
        assert_eq!(out.len(), 6);
        for p in &out {
            assert!((p.y.abs() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn triangle_loop_has_three_segments() {
        let mut out = Vec::new();
        line_loop(&pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]), 1.0, &mut out);
        assert_eq!(out.len(), 18);
    }

    #[test]
    fn degenerate_edges_are_skipped() {
        let mut out = Vec::new();
        line_loop(&pts(&[(5.0, 5.0), (5.0, 5.0)]), 1.0, &mut out);
        line_loop(&pts(&[(1.0, 1.0)]), 1.0, &mut out);
        assert!(out.is_empty());
    }
}
