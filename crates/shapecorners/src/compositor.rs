//! Per-paint corner shaping.
//!
//! For an eligible window the sequence is fixed:
//! capture backgrounds, default paint, blend corners over the result.
//! Nothing survives the call except the drawn pixels.

use crate::classify::WindowClassifier;
use crate::config::{ConfigState, CornerStyle};
use crate::coords::{Corner, Rect, Region};
use crate::host::{EffectsHost, FramebufferOrigin, MaskTextures};
use crate::mask::CornerMaskSet;
use crate::window::{EffectWindow, WindowPaintData, WindowQuadType};

/// What a paint call did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaintOutcome {
    /// Only the default paint ran.
    PassThrough,
    /// Corners were blended; `drawn` is indexed by [`Corner::index`].
    Shaped { drawn: [bool; 4] },
}

impl PaintOutcome {
    pub fn drawn(self, corner: Corner) -> bool {
        match self {
            PaintOutcome::PassThrough => false,
            PaintOutcome::Shaped { drawn } => drawn[corner.index()],
        }
    }
}

/// Borrowed view of the effect state needed to paint one window.
pub struct FrameCompositor<'a, P, M> {
    config: &'a ConfigState,
    masks: &'a CornerMaskSet,
    textures: &'a MaskTextures<M>,
    program: Option<&'a P>,
}

impl<'a, P, M> FrameCompositor<'a, P, M> {
    /// `program` is `None` when the corner shader failed to build.
    pub fn new(
        config: &'a ConfigState,
        masks: &'a CornerMaskSet,
        textures: &'a MaskTextures<M>,
        program: Option<&'a P>,
    ) -> Self {
        Self { config, masks, textures, program }
    }

    /// Paints `window` through `host`, shaping its corners when eligible.
    ///
    /// `data.quads` is identical before and after the call.
    pub fn paint<H>(
        &self,
        host: &mut H,
        window: &H::Window,
        region: &Region,
        data: &mut WindowPaintData,
    ) -> PaintOutcome
    where
        H: EffectsHost<Program = P, Mask = M> + ?Sized,
    {
        let original = self.config.filter_shadow.then(|| {
            let filtered = data.quads.filter_out(WindowQuadType::Shadow);
            std::mem::replace(&mut data.quads, filtered)
        });

        let outcome = self.paint_filtered(host, window, region, data);

        if let Some(quads) = original {
            data.quads = quads;
        }
        outcome
    }

    fn paint_filtered<H>(
        &self,
        host: &mut H,
        window: &H::Window,
        region: &Region,
        data: &mut WindowPaintData,
    ) -> PaintOutcome
    where
        H: EffectsHost<Program = P, Mask = M> + ?Sized,
    {
        let verdict = WindowClassifier::new(self.config, self.program.is_some()).classify(window);
        log::trace!("window {:?}: {verdict:?}", window.window_class());

        let program = match self.program {
            Some(program)
                if verdict.is_eligible()
                    && self.config.style != CornerStyle::None
                    && !self.masks.is_empty() =>
            {
                program
            }
            _ => {
                host.paint_window(window, region, data);
                return PaintOutcome::PassThrough;
            }
        };

        let geo = window.geometry();
        let screen = host.virtual_screen_geometry();
        let origin = host.framebuffer_origin();
        let rects = corner_rects(geo, self.masks.sides());
        let exempt = edge_exemptions(geo, screen, self.config.square_at_edge);

        // ── capture (before the window covers it) ─────────────────────────────
        let backgrounds = Corner::ALL.map(|corner| {
            let rect = rects[corner.index()];
            if exempt[corner.index()] || rect.is_empty() || self.textures.get(corner).is_none() {
                return None;
            }
            let scratch = host.capture_background(framebuffer_source_rect(rect, screen, origin));
            if scratch.is_none() {
                log::debug!("background capture failed for {corner:?} at {rect:?}; corner left square");
            }
            scratch
        });

        // ── window ────────────────────────────────────────────────────────────
        host.paint_window(window, region, data);

        // ── corners ───────────────────────────────────────────────────────────
        let mut drawn = [false; 4];
        host.set_blending(true);
        for corner in Corner::ALL {
            let i = corner.index();
            let (Some(background), Some(mask)) = (&backgrounds[i], self.textures.get(corner)) else {
                continue;
            };
            let Some(clip) = region.clip_to(rects[i]) else {
                continue;
            };
            host.draw_corner(program, background, mask, rects[i], clip);
            drawn[i] = true;
        }
        host.set_blending(false);

        PaintOutcome::Shaped { drawn }
    }
}

/// Screen rectangles covered by each corner mask, indexed by [`Corner::index`].
///
/// `sides` are the mask side lengths; a side of 0 gives an empty rectangle.
pub fn corner_rects(geo: Rect, sides: [u32; 4]) -> [Rect; 4] {
    Corner::ALL.map(|corner| {
        let s = sides[corner.index()] as i32;
        let anchor = match corner {
            Corner::TopLeft => geo.top_left(),
            Corner::TopRight => geo.top_right(),
            Corner::BottomRight => geo.bottom_right(),
            Corner::BottomLeft => geo.bottom_left(),
        };
        // Inclusive anchors: right and bottom corners grow back into the window.
        let x = if corner.is_left() { anchor.x } else { anchor.x - (s - 1) };
        let y = if corner.is_top() { anchor.y } else { anchor.y - (s - 1) };
        Rect::new(x, y, s, s)
    })
}

/// Corners left square because an adjacent window edge lies on the screen edge.
pub fn edge_exemptions(geo: Rect, screen: Rect, square_at_edge: bool) -> [bool; 4] {
    if !square_at_edge {
        return [false; 4];
    }
    let left = geo.left() == screen.left();
    let top = geo.top() == screen.top();
    let right = geo.right() == screen.right();
    let bottom = geo.bottom() == screen.bottom();
    Corner::ALL.map(|corner| {
        let vertical_edge = if corner.is_left() { left } else { right };
        let horizontal_edge = if corner.is_top() { top } else { bottom };
        vertical_edge || horizontal_edge
    })
}

/// Maps a screen rectangle to framebuffer addressing.
pub fn framebuffer_source_rect(rect: Rect, screen: Rect, origin: FramebufferOrigin) -> Rect {
    let x = rect.x - screen.x;
    let y = rect.y - screen.y;
    match origin {
        FramebufferOrigin::TopLeft => Rect::new(x, y, rect.width, rect.height),
        FramebufferOrigin::BottomLeft => {
            Rect::new(x, screen.height - y - rect.height, rect.width, rect.height)
        }
    }
}
