use super::Rect;

/// Paint region handed through the host's paint callback.
///
/// Stored as a plain list of rectangles; corner draws only need its bounding
/// box, so no canonicalization is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        region.add(rect);
        region
    }

    /// Adds `rect` to the region. Empty rectangles are dropped.
    pub fn add(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    #[inline]
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        let mut iter = self.rects.iter().copied();
        let first = iter.next()?;
        Some(iter.fold(first, Rect::united))
    }

    /// Bounding box of the region clipped to `rect`.
    pub fn clip_to(&self, rect: Rect) -> Option<Rect> {
        self.bounding_rect()?.intersect(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_region_has_no_bounds() {
        assert_eq!(Region::new().bounding_rect(), None);
        assert_eq!(Region::new().clip_to(Rect::new(0, 0, 5, 5)), None);
    }

    #[test]
    fn add_skips_empty_rects() {
        let mut region = Region::new();
        region.add(Rect::new(3, 3, 0, 4));
        assert!(region.is_empty());
    }

    #[test]
    fn clip_to_uses_bounding_box() {
        let mut region = Region::from_rect(Rect::new(0, 0, 10, 10));
        region.add(Rect::new(30, 30, 10, 10));
        assert_eq!(region.bounding_rect(), Some(Rect::new(0, 0, 40, 40)));
        assert_eq!(
            region.clip_to(Rect::new(35, 35, 20, 20)),
            Some(Rect::new(35, 35, 5, 5)),
        );
    }
}
