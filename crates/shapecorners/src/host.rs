//! Capabilities the effect consumes from its host compositor.
//!
//! [`CornerGpu`] covers device-level work done outside painting and is owned by
//! the effect. [`EffectsHost`] covers work done inside one paint call and is
//! borrowed for that frame only.

use crate::coords::{Corner, Rect, Region};
use crate::mask::{CornerMask, CornerMaskSet};
use crate::shader::{ShaderError, ShaderVersion};
use crate::window::{EffectWindow, WindowPaintData};

/// Row addressing of the framebuffer that background captures read from.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum FramebufferOrigin {
    /// Row 0 is the bottom of the screen (GL convention).
    #[default]
    BottomLeft,
    /// Row 0 is the top of the screen (wgpu/Vulkan/Metal convention).
    TopLeft,
}

/// Device-level GPU services.
pub trait CornerGpu {
    /// Compiled corner compositing program.
    type Program;
    /// Uploaded corner mask.
    type Mask;

    /// Whether the backend can copy from the frame it renders into.
    fn supported(&self) -> bool;

    /// Shading-language version used to pick the shader variant.
    fn shader_version(&self) -> ShaderVersion;

    /// Compiles and links the corner program from shader source.
    fn build_program(&self, source: &str) -> Result<Self::Program, ShaderError>;

    /// Uploads a non-empty mask.
    fn upload_mask(&self, mask: &CornerMask) -> Self::Mask;
}

/// Per-frame host services used while painting one window.
pub trait EffectsHost {
    type Window: EffectWindow + ?Sized;
    type Program;
    type Mask;
    /// Ephemeral copy of framebuffer content; dropped at the end of the paint call.
    type Scratch;

    /// Bounding rectangle of all outputs.
    fn virtual_screen_geometry(&self) -> Rect;

    fn framebuffer_origin(&self) -> FramebufferOrigin {
        FramebufferOrigin::BottomLeft
    }

    /// The host's default window paint.
    fn paint_window(&mut self, window: &Self::Window, region: &Region, data: &mut WindowPaintData);

    /// Copies `source` (framebuffer addressing) into a new scratch texture of the
    /// same size. `None` leaves that corner unshaped.
    fn capture_background(&mut self, source: Rect) -> Option<Self::Scratch>;

    /// Enables or disables `(src_alpha, 1 - src_alpha)` blending for corner draws.
    fn set_blending(&mut self, enabled: bool);

    /// Draws `background` over `target` (screen coordinates) using `mask` as
    /// alpha, clipped to `clip`.
    fn draw_corner(
        &mut self,
        program: &Self::Program,
        background: &Self::Scratch,
        mask: &Self::Mask,
        target: Rect,
        clip: Rect,
    );
}

/// Uploaded masks, one slot per corner. Empty masks are never uploaded.
#[derive(Debug)]
pub struct MaskTextures<M> {
    slots: [Option<M>; 4],
}

impl<M> Default for MaskTextures<M> {
    fn default() -> Self {
        Self { slots: [None, None, None, None] }
    }
}

impl<M> MaskTextures<M> {
    pub fn upload<G: CornerGpu<Mask = M> + ?Sized>(gpu: &G, masks: &CornerMaskSet) -> Self {
        Self::from_masks(masks, |mask| gpu.upload_mask(mask))
    }

    /// Converts every non-empty mask with `upload`.
    pub fn from_masks(masks: &CornerMaskSet, mut upload: impl FnMut(&CornerMask) -> M) -> Self {
        let mut textures = Self::default();
        for (corner, mask) in masks.iter() {
            if !mask.is_empty() {
                textures.slots[corner.index()] = Some(upload(mask));
            }
        }
        textures
    }

    #[inline]
    pub fn get(&self, corner: Corner) -> Option<&M> {
        self.slots[corner.index()].as_ref()
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
