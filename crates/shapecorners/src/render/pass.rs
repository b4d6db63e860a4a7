use wgpu::util::DeviceExt;

use crate::coords::{Rect, Size};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{capture_copy, clip_to_scissor, CornerUniform};
use super::corners::{CornerProgram, MaskTexture};

/// Per-frame copy of framebuffer content under one corner.
pub struct ScratchTexture {
    view: wgpu::TextureView,
    size: Size,
}

impl ScratchTexture {
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Capture and draw helpers a wgpu host builds its `EffectsHost` on.
pub struct CornerPass;

impl CornerPass {
    /// Copies `source` (frame pixels, top-down) into a new texture of the same
    /// size.
    ///
    /// Parts of `source` outside the frame stay transparent. Returns `None` when
    /// `source` is empty or entirely outside the frame.
    pub fn capture_background(
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        source: Rect,
    ) -> Option<ScratchTexture> {
        let copy = capture_copy(source, target.size())?;

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shapecorners scratch"),
            size: wgpu::Extent3d {
                width: source.width as u32,
                height: source.height as u32,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: target.color_texture.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        target.encoder.copy_texture_to_texture(
            wgpu::TexelCopyTextureInfo {
                texture: target.color_texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: copy.src.0, y: copy.src.1, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: copy.dst.0, y: copy.dst.1, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::Extent3d {
                width: copy.width,
                height: copy.height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Some(ScratchTexture { view, size: source.size() })
    }

    /// Draws `background` over `dst` with `mask` as alpha, scissored to `clip`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_corner(
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        program: &CornerProgram,
        blending: bool,
        background: &ScratchTexture,
        mask: &MaskTexture,
        dst: Rect,
        clip: Rect,
    ) {
        let Some((sx, sy, sw, sh)) = clip_to_scissor(clip, target.size()) else { return };

        if program.format() != target.color_texture.format() {
            log::warn!(
                "corner program built for {:?}, frame is {:?}; corner skipped",
                program.format(),
                target.color_texture.format(),
            );
            return;
        }

        let uniform = CornerUniform::new(ctx.viewport, dst);
        let ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shapecorners corner ubo"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shapecorners bind group"),
            layout: &program.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&background.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&mask.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&program.sampler),
                },
            ],
        });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("shapecorners corner pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(program.pipeline(blending));
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.set_vertex_buffer(0, program.quad_vbo.slice(..));
        rpass.set_index_buffer(program.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.set_scissor_rect(sx, sy, sw, sh);
        rpass.draw_indexed(0..6, 0, 0..1);
    }
}
