//! Corner mask generation.
//!
//! A mask is a `radius × radius` single-channel bitmap holding *cut coverage*:
//! 0 keeps the window's own pixel, 1 shows the captured background instead.
//! Masks are built on the CPU once per configuration and uploaded by the GPU
//! backend; nothing here runs per frame.

mod shape;

pub use shape::{cut_distance, SUBSAMPLES};

use crate::config::CornerStyle;
use crate::coords::{Corner, CornerRadius, Size};

/// Cut-coverage bitmap for one corner.
///
/// Rows are stored top-down, one byte per pixel (`0..=255` maps to `0.0..=1.0`).
/// The carved area touches the pixel nearest the window's physical corner, e.g.
/// local `(0, 0)` for [`Corner::TopLeft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerMask {
    side: u32,
    coverage: Vec<u8>,
}

impl CornerMask {
    /// Rasterizes the mask for `corner` at `radius`.
    ///
    /// Conceptually a `2r × 2r` canvas is covered everywhere except an inscribed
    /// circle (rounded) or diamond (chiseled); the mask is the `r × r` quadrant of
    /// that canvas adjacent to `corner`.
    pub fn rasterize(corner: Corner, radius: u32, style: CornerStyle) -> Self {
        let side = radius as usize;
        let mut coverage = vec![0u8; side * side];
        if side == 0 || style == CornerStyle::None {
            return Self { side: radius, coverage };
        }

        let (ox, oy) = quadrant_origin(corner, radius);
        let r = f64::from(radius);

        for y in 0..side {
            for x in 0..side {
                let px = f64::from(ox) + x as f64;
                let py = f64::from(oy) + y as f64;
                coverage[y * side + x] = pixel_coverage(style, r, px, py);
            }
        }

        Self { side: radius, coverage }
    }

    /// Side length in pixels (equals the corner radius).
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::square(self.side as i32)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.side == 0
    }

    /// Raw row-major bytes, ready for an `R8` texture upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.coverage
    }

    /// Cut coverage of pixel `(x, y)` in `0.0..=1.0`.
    ///
    /// # Panics
    /// Panics if the pixel is outside the mask.
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.side && y < self.side, "pixel ({x}, {y}) outside {0}x{0} mask", self.side);
        f32::from(self.coverage[(y * self.side + x) as usize]) / 255.0
    }
}

/// The four corner masks for one configuration.
///
/// Empty when the style is [`CornerStyle::None`]. Always regenerated wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CornerMaskSet {
    masks: Option<[CornerMask; 4]>,
}

impl CornerMaskSet {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds all four masks. Costs O(r²) per corner.
    pub fn generate(radii: CornerRadius, style: CornerStyle) -> Self {
        if style == CornerStyle::None {
            return Self::empty();
        }

        let masks = Corner::ALL.map(|corner| CornerMask::rasterize(corner, radii.get(corner), style));
        log::debug!("generated {style:?} corner masks for radii {:?}", radii.to_array());
        Self { masks: Some(masks) }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.masks.is_none()
    }

    #[inline]
    pub fn get(&self, corner: Corner) -> Option<&CornerMask> {
        self.masks.as_ref().map(|m| &m[corner.index()])
    }

    /// Mask side per corner, 0 where no mask exists.
    pub fn sides(&self) -> [u32; 4] {
        match &self.masks {
            Some(m) => [m[0].side, m[1].side, m[2].side, m[3].side],
            None => [0; 4],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Corner, &CornerMask)> {
        self.masks
            .iter()
            .flat_map(|m| Corner::ALL.into_iter().zip(m.iter()))
    }
}

/// Cut coverage of the canvas pixel whose top-left is `(px, py)`.
///
/// Pixels whose center is farther than [`solid_margin`] from the boundary lie
/// entirely on one side of it and skip subsampling.
fn pixel_coverage(style: CornerStyle, r: f64, px: f64, py: f64) -> u8 {
    let center = cut_distance(style, r, px + 0.5, py + 0.5);
    let margin = solid_margin(style);
    if center > margin {
        return u8::MAX;
    }
    if center < -margin {
        return 0;
    }
    subsampled_coverage(style, r, px, py)
}

/// Largest boundary distance, in `cut_distance` units, from a pixel center to
/// any point of that pixel.
fn solid_margin(style: CornerStyle) -> f64 {
    match style {
        // Euclidean: half the pixel diagonal.
        CornerStyle::Rounded => std::f64::consts::FRAC_1_SQRT_2,
        // L1: half width plus half height.
        CornerStyle::Chiseled | CornerStyle::None => 1.0,
    }
}

/// Fraction of an 8×8 sample grid that is cut. Samples exactly on the boundary
/// count half.
fn subsampled_coverage(style: CornerStyle, r: f64, px: f64, py: f64) -> u8 {
    let step = 1.0 / SUBSAMPLES as f64;
    // In half-sample units.
    let total = 2 * SUBSAMPLES * SUBSAMPLES;

    let mut hits = 0u32;
    for sy in 0..SUBSAMPLES {
        for sx in 0..SUBSAMPLES {
            let cx = px + (sx as f64 + 0.5) * step;
            let cy = py + (sy as f64 + 0.5) * step;
            let d = cut_distance(style, r, cx, cy);
            if d > 0.0 {
                hits += 2;
            } else if d == 0.0 {
                hits += 1;
            }
        }
    }

    ((hits * 255 + total / 2) / total) as u8
}

/// Top-left of the quadrant cropped for `corner` inside the `2r` canvas.
fn quadrant_origin(corner: Corner, radius: u32) -> (u32, u32) {
    match corner {
        Corner::TopLeft => (0, 0),
        Corner::TopRight => (radius, 0),
        Corner::BottomRight => (radius, radius),
        Corner::BottomLeft => (0, radius),
    }
}
