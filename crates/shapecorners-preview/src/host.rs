use shapecorners::coords::{Rect, Region};
use shapecorners::host::{EffectsHost, FramebufferOrigin};
use shapecorners::render::{CornerPass, CornerProgram, MaskTexture, RenderCtx, RenderTarget, ScratchTexture};
use shapecorners::window::WindowPaintData;

use crate::desk::DeskWindow;
use crate::quads::{fade, QuadRenderer, SolidQuad};

/// [`EffectsHost`] over the preview's offscreen frame.
///
/// The frame is the whole virtual screen, so screen and frame coordinates
/// coincide.
pub struct DeskHost<'a> {
    ctx: RenderCtx<'a>,
    target: RenderTarget<'a>,
    quads: &'a mut QuadRenderer,
    screen: Rect,
    blending: bool,
}

impl<'a> DeskHost<'a> {
    pub fn new(ctx: RenderCtx<'a>, target: RenderTarget<'a>, quads: &'a mut QuadRenderer) -> Self {
        let screen = Rect::new(0, 0, ctx.viewport.width, ctx.viewport.height);
        Self { ctx, target, quads, screen, blending: false }
    }
}

impl EffectsHost for DeskHost<'_> {
    type Window = DeskWindow;
    type Program = CornerProgram;
    type Mask = MaskTexture;
    type Scratch = ScratchTexture;

    fn virtual_screen_geometry(&self) -> Rect {
        self.screen
    }

    fn framebuffer_origin(&self) -> FramebufferOrigin {
        FramebufferOrigin::TopLeft
    }

    fn paint_window(&mut self, window: &DeskWindow, region: &Region, data: &mut WindowPaintData) {
        let solids: Vec<SolidQuad> = data
            .quads
            .iter()
            .map(|q| SolidQuad {
                rect: q.rect,
                color: fade(window.color_of(q.kind), data.opacity),
            })
            .collect();

        let Some(clip) = region.bounding_rect() else { return };
        self.quads.render(&self.ctx, &mut self.target, &solids, Some(clip));
    }

    fn capture_background(&mut self, source: Rect) -> Option<ScratchTexture> {
        CornerPass::capture_background(&self.ctx, &mut self.target, source)
    }

    fn set_blending(&mut self, enabled: bool) {
        self.blending = enabled;
    }

    fn draw_corner(
        &mut self,
        program: &CornerProgram,
        background: &ScratchTexture,
        mask: &MaskTexture,
        target: Rect,
        clip: Rect,
    ) {
        CornerPass::draw_corner(
            &self.ctx,
            &mut self.target,
            program,
            self.blending,
            background,
            mask,
            target,
            clip,
        );
    }
}
