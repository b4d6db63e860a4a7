use crate::coords::Size;

/// Renderer-facing context (device/queue + frame format + viewport).
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Size, // framebuffer px
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Size,
    ) -> Self {
        Self {
            device,
            queue,
            surface_format,
            viewport,
        }
    }
}

/// Target for drawing (encoder + the frame texture and its view).
///
/// The texture must carry `COPY_SRC` for background captures to work.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_texture: &'a wgpu::Texture,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(
        encoder: &'a mut wgpu::CommandEncoder,
        color_texture: &'a wgpu::Texture,
        color_view: &'a wgpu::TextureView,
    ) -> Self {
        Self { encoder, color_texture, color_view }
    }

    /// Frame size in pixels.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.color_texture.width() as i32, self.color_texture.height() as i32)
    }
}
