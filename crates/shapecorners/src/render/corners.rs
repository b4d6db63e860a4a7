use wgpu::util::DeviceExt;

use crate::host::CornerGpu;
use crate::mask::CornerMask;
use crate::shader::{ShaderError, ShaderVersion};

use super::common::{corner_blend, CornerUniform, QuadVertex, QUAD_INDICES, QUAD_VERTICES};

/// Maps an adapter's shader model to the shading-language version used for
/// variant selection.
pub fn shader_version_for(model: wgpu::ShaderModel) -> ShaderVersion {
    match model {
        wgpu::ShaderModel::Sm2 => ShaderVersion::new(1, 10),
        wgpu::ShaderModel::Sm4 => ShaderVersion::new(1, 40),
        wgpu::ShaderModel::Sm5 => ShaderVersion::new(4, 30),
    }
}

/// [`CornerGpu`] over a wgpu device.
pub struct WgpuCornerGpu {
    device: wgpu::Device,
    queue: wgpu::Queue,
    format: wgpu::TextureFormat,
    shader_version: ShaderVersion,
    capture_supported: bool,
}

impl WgpuCornerGpu {
    /// `frame_usage` is the usage of the texture windows are painted into;
    /// captures need `COPY_SRC` on it.
    pub fn new(
        adapter: &wgpu::Adapter,
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        frame_usage: wgpu::TextureUsages,
    ) -> Self {
        let model = adapter.get_downlevel_capabilities().shader_model;
        let shader_version = shader_version_for(model);
        let capture_supported = frame_usage.contains(wgpu::TextureUsages::COPY_SRC);
        log::debug!("corner gpu: {model:?} -> shader version {shader_version}, capture={capture_supported}");
        Self { device, queue, format, shader_version, capture_supported }
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn build_pipeline(
        &self,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        blend: Option<wgpu::BlendState>,
        label: &str,
    ) -> wgpu::RenderPipeline {
        self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),

            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.format,
                    blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

impl CornerGpu for WgpuCornerGpu {
    type Program = CornerProgram;
    type Mask = MaskTexture;

    fn supported(&self) -> bool {
        self.capture_supported
    }

    fn shader_version(&self) -> ShaderVersion {
        self.shader_version
    }

    fn build_program(&self, source: &str) -> Result<CornerProgram, ShaderError> {
        // Everything up to `scope.pop()` reports into the scope, not the
        // device's uncaptured-error handler.
        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shapecorners shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout = self.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shapecorners bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: CornerUniform::min_binding_size(),
                    },
                    count: None,
                },
                // background
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // mask
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = self.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shapecorners pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let blended = self.build_pipeline(&shader, &pipeline_layout, Some(corner_blend()), "shapecorners blend pipeline");
        let opaque = self.build_pipeline(&shader, &pipeline_layout, None, "shapecorners opaque pipeline");

        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(ShaderError::Build(err.to_string()));
        }

        // Texel-exact: masks and captures are drawn 1:1.
        let sampler = self.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shapecorners sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let quad_vbo = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shapecorners quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let quad_ibo = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shapecorners quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(CornerProgram {
            format: self.format,
            blended,
            opaque,
            bind_group_layout,
            sampler,
            quad_vbo,
            quad_ibo,
        })
    }

    fn upload_mask(&self, mask: &CornerMask) -> MaskTexture {
        let side = mask.side();
        let size = wgpu::Extent3d { width: side, height: side, depth_or_array_layers: 1 };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shapecorners mask"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            mask.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(side),
                rows_per_image: Some(side),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        MaskTexture { view, side }
    }
}

/// Compiled corner program plus the static resources every draw shares.
pub struct CornerProgram {
    pub(super) format: wgpu::TextureFormat,
    pub(super) blended: wgpu::RenderPipeline,
    pub(super) opaque: wgpu::RenderPipeline,
    pub(super) bind_group_layout: wgpu::BindGroupLayout,
    pub(super) sampler: wgpu::Sampler,
    pub(super) quad_vbo: wgpu::Buffer,
    pub(super) quad_ibo: wgpu::Buffer,
}

impl CornerProgram {
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub(super) fn pipeline(&self, blending: bool) -> &wgpu::RenderPipeline {
        if blending { &self.blended } else { &self.opaque }
    }
}

/// Uploaded `R8Unorm` corner mask.
pub struct MaskTexture {
    pub(super) view: wgpu::TextureView,
    side: u32,
}

impl MaskTexture {
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderVariant;

    /// Any adapter wgpu can find, software included. `None` on machines
    /// without one.
    fn headless_gpu() -> Option<WgpuCornerGpu> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok()?;
        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("shapecorners test device"),
            ..Default::default()
        }))
        .ok()?;
        Some(WgpuCornerGpu::new(
            &adapter,
            device,
            queue,
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        ))
    }

    fn shipped_shader(variant: ShaderVariant) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../data")
            .join(variant.relative_path());
        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn invalid_source_is_an_error_not_a_panic() {
        let Some(gpu) = headless_gpu() else {
            eprintln!("no wgpu adapter; skipping");
            return;
        };
        let result = gpu.build_program("this is not wgsl");
        assert!(matches!(result, Err(ShaderError::Build(_))));
    }

    #[test]
    fn shipped_shaders_build() {
        let Some(gpu) = headless_gpu() else {
            eprintln!("no wgpu adapter; skipping");
            return;
        };
        for variant in [ShaderVariant::Legacy, ShaderVariant::Modern] {
            let program = gpu.build_program(&shipped_shader(variant));
            assert!(program.is_ok(), "{variant:?}: {:?}", program.err());
        }
    }

    #[test]
    fn shader_models_map_to_variants() {
        assert_eq!(ShaderVariant::for_version(shader_version_for(wgpu::ShaderModel::Sm2)), ShaderVariant::Legacy);
        assert_eq!(ShaderVariant::for_version(shader_version_for(wgpu::ShaderModel::Sm4)), ShaderVariant::Modern);
        assert_eq!(ShaderVariant::for_version(shader_version_for(wgpu::ShaderModel::Sm5)), ShaderVariant::Modern);
    }
}
