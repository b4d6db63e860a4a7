use super::{Point, Size};

/// Axis-aligned integer rectangle in device pixels (top-left origin).
///
/// `right()` and `bottom()` are inclusive: a 10px wide rect at x = 0 has
/// `right() == 9`. Window geometry and screen bounds from the host follow the
/// same convention, so edge comparisons line up without off-by-one fixes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn left(self) -> i32 {
        self.x
    }

    #[inline]
    pub fn top(self) -> i32 {
        self.y
    }

    /// Inclusive right edge.
    #[inline]
    pub fn right(self) -> i32 {
        self.x + self.width - 1
    }

    /// Inclusive bottom edge.
    #[inline]
    pub fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    #[inline]
    pub fn top_left(self) -> Point {
        Point::new(self.left(), self.top())
    }

    #[inline]
    pub fn top_right(self) -> Point {
        Point::new(self.right(), self.top())
    }

    #[inline]
    pub fn bottom_right(self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    #[inline]
    pub fn bottom_left(self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    #[inline]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.x + self.width && p.y < self.y + self.height
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    ///
    /// Empty rectangles do not contribute.
    #[inline]
    pub fn united(self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = (self.x + self.width).max(other.x + other.width);
        let y1 = (self.y + self.height).max(other.y + other.height);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: i32, y: i32, w: i32, h: i32) -> Rect { Rect::new(x, y, w, h) }

    // ── edges ─────────────────────────────────────────────────────────────

    #[test]
    fn right_and_bottom_are_inclusive() {
        let rect = r(0, 0, 10, 20);
        assert_eq!(rect.right(), 9);
        assert_eq!(rect.bottom(), 19);
        assert_eq!(rect.bottom_right(), Point::new(9, 19));
    }

    #[test]
    fn corner_points_follow_edges() {
        let rect = r(5, 7, 4, 3);
        assert_eq!(rect.top_left(), Point::new(5, 7));
        assert_eq!(rect.top_right(), Point::new(8, 7));
        assert_eq!(rect.bottom_left(), Point::new(5, 9));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0, 0, 10, 10).contains(Point::new(0, 0)));
    }

    #[test]
    fn contains_max_edge_exclusive() {
        assert!(!r(0, 0, 10, 10).contains(Point::new(10, 10)));
        assert!(r(0, 0, 10, 10).contains(Point::new(9, 9)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let a = r(0, 0, 10, 10);
        let b = r(5, 5, 10, 10);
        assert_eq!(a.intersect(b), Some(r(5, 5, 5, 5)));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        let a = r(0, 0, 10, 10);
        let b = r(10, 0, 10, 10);
        assert!(a.intersect(b).is_none());
    }

    // ── united ────────────────────────────────────────────────────────────

    #[test]
    fn united_spans_both() {
        assert_eq!(r(0, 0, 2, 2).united(r(5, 5, 1, 1)), r(0, 0, 6, 6));
    }

    #[test]
    fn united_ignores_empty() {
        assert_eq!(r(0, 0, 0, 0).united(r(3, 3, 2, 2)), r(3, 3, 2, 2));
    }
}
