/// One of the four window corners, in clockwise order from the top-left.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners in index order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for the two corners on the window's left edge.
    #[inline]
    pub const fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// True for the two corners on the window's top edge.
    #[inline]
    pub const fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// Per-corner radii in device pixels.
///
/// Corners follow CSS convention: top-left, top-right, bottom-right, bottom-left.
/// Values are never negative; [`CornerRadius::expand`] clamps its input.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CornerRadius {
    pub top_left: u32,
    pub top_right: u32,
    pub bottom_right: u32,
    pub bottom_left: u32,
}

impl CornerRadius {
    #[inline]
    pub const fn new(top_left: u32, top_right: u32, bottom_right: u32, bottom_left: u32) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Uniform radius on all four corners.
    #[inline]
    pub const fn all(r: u32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// No rounding.
    #[inline]
    pub const fn zero() -> Self {
        Self::all(0)
    }

    /// Builds radii from a configuration list using the mirroring rule:
    ///
    /// | len | result         |
    /// |-----|----------------|
    /// | 1   | `[a, a, a, a]` |
    /// | 2   | `[a, b, a, b]` |
    /// | 3   | `[a, b, c, b]` |
    /// | 4   | as given       |
    ///
    /// Negative entries become 0 and entries above `max` are capped. Entries past
    /// the fourth are ignored. An empty list yields `None`.
    pub fn expand(values: &[i64], max: u32) -> Option<Self> {
        let clamp = |v: i64| v.clamp(0, i64::from(max)) as u32;
        let r = match values {
            [] => return None,
            [a] => [clamp(*a); 4],
            [a, b] => [clamp(*a), clamp(*b), clamp(*a), clamp(*b)],
            [a, b, c] => [clamp(*a), clamp(*b), clamp(*c), clamp(*b)],
            [a, b, c, d, ..] => [clamp(*a), clamp(*b), clamp(*c), clamp(*d)],
        };
        Some(Self::from_array(r))
    }

    #[inline]
    pub const fn from_array(r: [u32; 4]) -> Self {
        Self::new(r[0], r[1], r[2], r[3])
    }

    #[inline]
    pub const fn to_array(self) -> [u32; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    #[inline]
    pub const fn get(self, corner: Corner) -> u32 {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
            Corner::BottomLeft => self.bottom_left,
        }
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.top_left == 0 && self.top_right == 0 && self.bottom_right == 0 && self.bottom_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u32 = 1024;

    #[test]
    fn corner_sides() {
        let left: Vec<Corner> = Corner::ALL.into_iter().filter(|c| c.is_left()).collect();
        let top: Vec<Corner> = Corner::ALL.into_iter().filter(|c| c.is_top()).collect();
        assert_eq!(left, [Corner::TopLeft, Corner::BottomLeft]);
        assert_eq!(top, [Corner::TopLeft, Corner::TopRight]);
    }

    #[test]
    fn single_value_fills_all_corners() {
        assert_eq!(CornerRadius::expand(&[7], MAX), Some(CornerRadius::all(7)));
    }

    #[test]
    fn two_values_mirror_diagonally() {
        // TopLeft = BottomRight, TopRight = BottomLeft.
        assert_eq!(
            CornerRadius::expand(&[4, 9], MAX).map(CornerRadius::to_array),
            Some([4, 9, 4, 9]),
        );
    }

    #[test]
    fn three_values_reuse_top_right_for_bottom_left() {
        assert_eq!(
            CornerRadius::expand(&[1, 2, 3], MAX).map(CornerRadius::to_array),
            Some([1, 2, 3, 2]),
        );
    }

    #[test]
    fn four_values_are_taken_verbatim() {
        assert_eq!(
            CornerRadius::expand(&[1, 2, 3, 4], MAX).map(CornerRadius::to_array),
            Some([1, 2, 3, 4]),
        );
    }

    #[test]
    fn negatives_clamp_before_expansion() {
        assert_eq!(CornerRadius::expand(&[-5], MAX), Some(CornerRadius::zero()));
        assert_eq!(
            CornerRadius::expand(&[-1, 6], MAX).map(CornerRadius::to_array),
            Some([0, 6, 0, 6]),
        );
        assert_eq!(
            CornerRadius::expand(&[3, -2, 8], MAX).map(CornerRadius::to_array),
            Some([3, 0, 8, 0]),
        );
    }

    #[test]
    fn extra_values_are_ignored() {
        assert_eq!(
            CornerRadius::expand(&[1, 2, 3, 4, 5, 6], MAX).map(CornerRadius::to_array),
            Some([1, 2, 3, 4]),
        );
    }

    #[test]
    fn empty_list_has_no_radii() {
        assert_eq!(CornerRadius::expand(&[], MAX), None);
    }

    #[test]
    fn oversized_values_are_capped() {
        assert_eq!(CornerRadius::expand(&[1 << 40], MAX), Some(CornerRadius::all(MAX)));
    }

    #[test]
    fn get_matches_index_order() {
        let r = CornerRadius::new(1, 2, 3, 4);
        for (i, corner) in Corner::ALL.into_iter().enumerate() {
            assert_eq!(corner.index(), i);
            assert_eq!(r.get(corner), r.to_array()[i]);
        }
    }
}
