use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

mod config;
mod error;
mod frame;
mod math;
mod renderer;
mod ui;

use config::{Cli, PlotConfig};
use error::{RenderError, RenderResult};
use frame::FrameOrchestrator;
use math::build_surface_mesh;
use renderer::{GpuState, TransformPipeline};
use ui::{OverlayStats, apply_theme, draw_stats_overlay};

/// egui platform state and renderer for the statistics overlay.
struct Overlay {
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Overlay {
    fn new(ctx: &egui::Context, window: &Window, gpu: &GpuState) -> Self {
        let state = egui_winit::State::new(
            ctx.clone(),
            ctx.viewport_id(),
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(ctx);

        Self { state, renderer }
    }

    /// Draws the overlay on top of whatever `view` already holds.
    fn paint(
        &mut self,
        ctx: &egui::Context,
        window: &Window,
        gpu: &GpuState,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        stats: &OverlayStats,
    ) {
        let raw_input = self.state.take_egui_input(window);
        let full_output = ctx.run(raw_input, |ctx| draw_stats_overlay(ctx, stats));

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            self.renderer
                .update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        self.renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            self.renderer.free_texture(&id);
        }
    }
}

struct App {
    config: PlotConfig,
    field_name: &'static str,
    orchestrator: FrameOrchestrator,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_ctx: egui::Context,
    overlay: Option<Overlay>,

    last_frame_time: Instant,
    frame_count: u32,
    fps_timer: Instant,
    fps: f32,

    fatal: Option<RenderError>,
}

impl App {
    fn new(config: PlotConfig, field_name: &'static str, orchestrator: FrameOrchestrator) -> Self {
        Self {
            config,
            field_name,
            orchestrator,

            window: None,
            gpu: None,
            egui_ctx: egui::Context::default(),
            overlay: None,

            last_frame_time: Instant::now(),
            frame_count: 0,
            fps_timer: Instant::now(),
            fps: 0.0,

            fatal: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> RenderResult<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.orchestrator.mesh(),
            self.config.window.clear_color,
        ))?;

        if self.config.window.overlay {
            self.overlay = Some(Overlay::new(&self.egui_ctx, &window, &gpu));
        }

        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RenderError) {
        log::error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn pace_frame(&mut self) {
        let frame_duration = Duration::from_millis(u64::from(self.config.window.frame_ms));
        let elapsed = self.last_frame_time.elapsed();
        if elapsed < frame_duration {
            std::thread::sleep(frame_duration - elapsed);
        }
        self.last_frame_time = Instant::now();

        self.frame_count += 1;
        if self.fps_timer.elapsed().as_secs_f32() >= 1.0 {
            self.fps = self.frame_count as f32 / self.fps_timer.elapsed().as_secs_f32();
            let rotation = self.orchestrator.rotation();
            log::debug!(
                "{:.1} fps, frame {}, rx {:.2}, ry {:.2}",
                self.fps,
                self.orchestrator.frames(),
                rotation.rx,
                rotation.ry
            );
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }
    }

    fn render(&mut self) -> RenderResult<()> {
        self.pace_frame();

        let (Some(window), Some(gpu)) = (&self.window, &mut self.gpu) else {
            return Ok(());
        };

        let frame = self.orchestrator.tick(
            self.config.window.frame_ms,
            gpu.config.width,
            gpu.config.height,
        );
        frame.submit(gpu);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                gpu.resize(gpu.size);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring surface texture, skipping frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(RenderError::OutOfMemory);
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        gpu.render_surface(&view, &mut encoder);

        if let Some(overlay) = &mut self.overlay {
            let mesh = self.orchestrator.mesh();
            let stats = OverlayStats {
                field: self.field_name,
                grid: (self.config.domain.nx, self.config.domain.ny),
                vertices: mesh.vertices().len(),
                triangles: mesh.triangle_count(),
                z_range: mesh.z_range(),
                fps: self.fps,
                frames: self.orchestrator.frames(),
                rotation: self.orchestrator.rotation(),
            };
            overlay.paint(&self.egui_ctx, window, gpu, &view, &mut encoder, &stats);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_gpu(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(overlay), Some(window)) = (&mut self.overlay, &self.window) {
            let _ = overlay.state.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                    && event.state == ElementState::Pressed
                {
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.render() {
                    self.fail(event_loop, err);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = PlotConfig::from_cli(&cli).context("invalid configuration")?;

    let field = config.scalar_field()?;
    log::info!("Plotting {} over {:?}", field.name(), config.domain);

    let mesh = build_surface_mesh(field.as_ref(), &config.domain)
        .context("failed to build surface mesh")?;
    let pipeline = TransformPipeline::new(config.camera, config.animation);
    let orchestrator = FrameOrchestrator::new(mesh, pipeline, config.lighting);

    let event_loop = EventLoop::new().map_err(RenderError::from)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, field.name(), orchestrator);
    event_loop.run_app(&mut app).map_err(RenderError::from)?;

    match app.fatal.take() {
        Some(err) => Err(err).context("renderer stopped"),
        None => Ok(()),
    }
}
