use crate::config::CornerStyle;

/// Subsamples per pixel axis used for antialiasing (8×8 grid).
pub const SUBSAMPLES: u32 = 8;

/// Signed distance-like value of point `(x, y)` on the `2r × 2r` mask canvas.
///
/// Positive means the point is cut away (outside the inscribed shape), zero is
/// on the cut boundary, negative keeps window content.
///
/// - Rounded: `|p - c| - r` for the circle centered at `c = (r, r)`.
/// - Chiseled: `|x - r| + |y - r| - r`, the diamond through the four edge
///   midpoints `(r, 0)`, `(2r, r)`, `(r, 2r)`, `(0, r)`.
pub fn cut_distance(style: CornerStyle, r: f64, x: f64, y: f64) -> f64 {
    let dx = x - r;
    let dy = y - r;
    match style {
        CornerStyle::Rounded => (dx * dx + dy * dy).sqrt() - r,
        CornerStyle::Chiseled => dx.abs() + dy.abs() - r,
        CornerStyle::None => -1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chiseled_boundary_passes_through_edge_midpoints() {
        for r in [1.0, 7.0, 12.0, 33.0] {
            let midpoints = [(r, 0.0), (2.0 * r, r), (r, 2.0 * r), (0.0, r)];
            for (x, y) in midpoints {
                assert_eq!(cut_distance(CornerStyle::Chiseled, r, x, y), 0.0);
            }
            // The canvas corner is cut, the center is kept.
            assert!(cut_distance(CornerStyle::Chiseled, r, 0.0, 0.0) > 0.0);
            assert!(cut_distance(CornerStyle::Chiseled, r, r, r) < 0.0);
        }
    }

    #[test]
    fn chiseled_boundary_is_a_45_degree_line() {
        let r = 10.0;
        // Every point on the segment (0, r) -> (r, 0) lies on the boundary.
        for i in 0..=10 {
            let t = i as f64;
            assert_eq!(cut_distance(CornerStyle::Chiseled, r, t, r - t), 0.0);
        }
    }

    #[test]
    fn rounded_boundary_is_the_inscribed_circle() {
        let r = 12.0;
        assert_eq!(cut_distance(CornerStyle::Rounded, r, r, 0.0), 0.0);
        assert_eq!(cut_distance(CornerStyle::Rounded, r, 0.0, r), 0.0);
        let d = std::f64::consts::FRAC_1_SQRT_2 * r;
        assert!(cut_distance(CornerStyle::Rounded, r, r - d, r - d).abs() < 1e-9);
        assert!(cut_distance(CornerStyle::Rounded, r, 0.0, 0.0) > 0.0);
    }

    #[test]
    fn style_none_never_cuts() {
        assert!(cut_distance(CornerStyle::None, 5.0, 0.0, 0.0) < 0.0);
    }
}
