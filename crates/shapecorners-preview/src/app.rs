use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use shapecorners::config::{KConfig, GENERAL_GROUP};
use shapecorners::coords::Region;
use shapecorners::render::{RenderCtx, RenderTarget, WgpuCornerGpu};
use shapecorners::shader::ShaderLocator;
use shapecorners::window::WindowPaintData;
use shapecorners::ShapeCorners;

use crate::desk::{sample_desk, wallpaper, DeskWindow};
use crate::gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction, FRAME_USAGE};
use crate::host::DeskHost;
use crate::quads::{clear, rgba, QuadRenderer};

/// Shaders shipped in the workspace, searched before the XDG data dirs.
const WORKSPACE_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data");

/// Window configuration.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            title: "shapecorners preview".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Opens the preview window and runs until it is closed.
pub fn run(config: PreviewConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = PreviewApp::new(config);

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    Ok(())
}

#[self_referencing]
struct PreviewSurface {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct PreviewApp {
    config: PreviewConfig,
    surface: Option<PreviewSurface>,
    effect: Option<ShapeCorners<WgpuCornerGpu>>,
    quads: QuadRenderer,
    desk: Vec<DeskWindow>,
    exit_requested: bool,
}

impl PreviewApp {
    fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            surface: None,
            effect: None,
            quads: QuadRenderer::new(),
            desk: Vec::new(),
            exit_requested: false,
        }
    }

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let surface = PreviewSurfaceTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, GpuInit::default())),
        }
        .try_build()?;

        let effect = surface.with_gpu(|gpu| {
            let corner_gpu = WgpuCornerGpu::new(
                gpu.adapter(),
                gpu.device().clone(),
                gpu.queue().clone(),
                gpu.surface_format(),
                FRAME_USAGE,
            );
            let config = load_config();
            let mut shaders = ShaderLocator::from_env();
            shaders.prepend(WORKSPACE_DATA_DIR);
            ShapeCorners::new(corner_gpu, &config.group(GENERAL_GROUP), &shaders)
        });

        self.desk = surface.with_gpu(|gpu| sample_desk(gpu.frame_size()));
        self.effect = Some(effect);
        self.surface = Some(surface);
        Ok(())
    }

    fn reconfigure(&mut self) {
        let Some(effect) = self.effect.as_mut() else { return };
        let config = load_config();
        effect.reconfigure(&config.group(GENERAL_GROUP));
        self.request_redraw();
    }

    fn request_redraw(&self) {
        if let Some(surface) = &self.surface {
            surface.with_window(|w| w.request_redraw());
        }
    }

    fn redraw(&mut self) {
        let (Some(surface), Some(effect)) = (self.surface.as_mut(), self.effect.as_ref()) else {
            return;
        };
        let (quads, desk) = (&mut self.quads, &self.desk);

        let action = surface.with_gpu_mut(|gpu| {
            let frame = match gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    log::debug!("surface error: {err:?}");
                    return Some(gpu.handle_surface_error(err));
                }
            };
            let frame = render_desk(gpu, frame, effect, quads, desk);
            gpu.present(frame);
            None
        });

        match action {
            Some(SurfaceErrorAction::Fatal) => {
                log::error!("fatal surface error; exiting");
                self.exit_requested = true;
            }
            Some(SurfaceErrorAction::Reconfigured) => self.request_redraw(),
            Some(SurfaceErrorAction::SkipFrame) | None => {}
        }
    }
}

/// Paints wallpaper and every desk window into the offscreen frame.
fn render_desk(
    gpu: &Gpu<'_>,
    mut frame: GpuFrame,
    effect: &ShapeCorners<WgpuCornerGpu>,
    quads: &mut QuadRenderer,
    desk: &[DeskWindow],
) -> GpuFrame {
    let size = gpu.frame_size();
    {
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), size);
        let mut target = RenderTarget::new(&mut frame.encoder, gpu.frame_texture(), gpu.frame_view());

        clear(&mut target, rgba(0.0, 0.0, 0.0, 1.0));
        quads.render(&ctx, &mut target, &wallpaper(size), None);

        let mut host = DeskHost::new(ctx, target, quads);
        for window in desk {
            let mut data = WindowPaintData::new(window.quads());
            let region = Region::from_rect(window.paint_bounds());
            let outcome = effect.paint_window(&mut host, window, &region, &mut data);
            log::trace!("{}: {outcome:?}", window.class);
        }
    }
    frame
}

/// Reads `shapecornersrc`; an unreadable or malformed file falls back to defaults.
fn load_config() -> KConfig {
    KConfig::open_default().unwrap_or_else(|err| {
        log::warn!("{err:#}; using defaults");
        KConfig::default()
    })
}

impl ApplicationHandler for PreviewApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            log::error!("failed to create preview window: {e:#}");
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        log::info!("R reloads the configuration, Escape quits");
        self.request_redraw();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.exit_requested = true;
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed && !event.repeat => {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) => self.exit_requested = true,
                    PhysicalKey::Code(KeyCode::KeyR) => {
                        log::info!("reloading configuration");
                        self.reconfigure();
                    }
                    _ => {}
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.with_gpu_mut(|gpu| gpu.resize(new_size));
                    self.desk = surface.with_gpu(|gpu| sample_desk(gpu.frame_size()));
                }
                self.request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
