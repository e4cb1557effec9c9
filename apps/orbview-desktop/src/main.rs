mod config;

use anyhow::Result;
use clap::Parser;
use config::ViewerConfig;
use egui::Context as EguiContext;
use orbview_common::{AssetPolicy, ColorSpace};
use orbview_core::{FrameHandler, FrameLoop, Viewport, ViewerCommand};
use orbview_render_wgpu::ViewerRenderer;
use orbview_scene::{OrbitCamera, Scene, compose};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "orbview", about = "Interactive 3-D sphere viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding textures/ and skybox/ assets
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Viewer configuration file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort startup when an asset fails to load instead of degrading
    #[arg(long)]
    strict_assets: bool,
}

/// One frame's worth of mutable borrows, handed to the frame loop.
struct FrameCtx<'a> {
    window: &'a Window,
    surface: &'a wgpu::Surface<'static>,
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    surface_config: &'a mut wgpu::SurfaceConfiguration,
    renderer: &'a mut ViewerRenderer,
    viewport: &'a mut Viewport,
    camera: &'a mut OrbitCamera,
    scene: &'a mut Scene,
    egui_ctx: &'a EguiContext,
    egui_winit: &'a mut egui_winit::State,
    egui_renderer: &'a mut egui_wgpu::Renderer,
    /// Commands produced by this frame's UI, queued for the next tick.
    pending: Vec<ViewerCommand>,
}

impl FrameHandler for FrameCtx<'_> {
    fn apply(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::Resize {
                logical_width,
                logical_height,
                scale_factor,
            } => {
                let Some(size) = self
                    .viewport
                    .resize(logical_width, logical_height, scale_factor)
                else {
                    return;
                };
                self.surface_config.width = size.width;
                self.surface_config.height = size.height;
                self.surface.configure(self.device, self.surface_config);
                self.renderer.resize(self.device, size.width, size.height);
                self.camera.set_aspect(self.viewport.aspect_ratio());
            }
            ViewerCommand::SetOutputColorSpace(color_space) => {
                self.scene.set_output_color_space(color_space);
            }
            ViewerCommand::SetTextureColorSpace(color_space) => {
                self.scene.set_texture_color_space(color_space);
            }
            // Intercepted by the loop before apply.
            ViewerCommand::Stop => {}
        }
    }

    fn update(&mut self, dt: f32) {
        self.camera.update(dt);
    }

    fn render(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(self.device, self.surface_config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(self.device, self.queue, &view, self.camera, self.scene);

        // Debug panel. Selections become commands for the next tick, so a
        // change takes effect on the next render and nothing else moves.
        let mut output_cs = self.scene.output_color_space;
        let mut texture_cs = self.scene.texture_color_space;

        let raw_input = self.egui_winit.take_egui_input(self.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            draw_debug_panel(ctx, &mut output_cs, &mut texture_cs);
        });

        if output_cs != self.scene.output_color_space {
            self.pending
                .push(ViewerCommand::SetOutputColorSpace(output_cs));
        }
        if texture_cs != self.scene.texture_color_space {
            self.pending
                .push(ViewerCommand::SetTextureColorSpace(texture_cs));
        }

        self.egui_winit
            .handle_platform_output(self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(self.device, self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            self.device,
            self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

fn draw_debug_panel(ctx: &EguiContext, output: &mut ColorSpace, texture: &mut ColorSpace) {
    egui::Window::new("Color")
        .default_width(220.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("HDR");
            egui::ComboBox::from_label("Output color space")
                .selected_text(output.label())
                .show_ui(ui, |ui| {
                    for option in [ColorSpace::Linear, ColorSpace::Srgb] {
                        ui.selectable_value(output, option, option.label());
                    }
                });

            ui.separator();
            ui.heading("Mid Gray");
            egui::ComboBox::from_label("Texture color space")
                .selected_text(texture.label())
                .show_ui(ui, |ui| {
                    for option in [ColorSpace::NoColor, ColorSpace::Linear, ColorSpace::Srgb] {
                        ui.selectable_value(texture, option, option.label());
                    }
                });
        });
}

struct ViewerApp {
    config: ViewerConfig,
    frame_loop: FrameLoop,
    viewport: Viewport,
    camera: OrbitCamera,
    scene: Scene,
    dragging: bool,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    surface_config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<ViewerRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl ViewerApp {
    fn new(config: ViewerConfig, scene: Scene) -> Self {
        let camera = scene.camera();
        let viewport = Viewport::new(config.window_width as f64, config.window_height as f64, 1.0);
        Self {
            config,
            frame_loop: FrameLoop::new(),
            viewport,
            camera,
            scene,
            dragging: false,
            window: None,
            surface: None,
            device: None,
            queue: None,
            surface_config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("orbview")
            .with_inner_size(PhysicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("orbview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        // Initial sizing pass: must complete before the first render.
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let logical = size.to_logical::<f64>(scale_factor);
        self.viewport
            .resize(logical.width, logical.height, scale_factor);
        let physical = self.viewport.physical_size();
        self.camera.set_aspect(self.viewport.aspect_ratio());

        let surface_caps = surface.get_capabilities(&adapter);
        // Prefer a non-sRGB format: gamma encoding is done in the shader so
        // the output color-space toggle actually changes the image.
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: physical.width,
            height: physical.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let renderer = ViewerRenderer::new(
            &device,
            &queue,
            surface_format,
            physical.width,
            physical.height,
            &self.scene,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.surface_config = Some(surface_config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        self.frame_loop.start();

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.frame_loop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(window) = &self.window {
                    let scale_factor = window.scale_factor();
                    let logical = new_size.to_logical::<f64>(scale_factor);
                    self.frame_loop.push(ViewerCommand::Resize {
                        logical_width: logical.width,
                        logical_height: logical.height,
                        scale_factor,
                    });
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let logical = window.inner_size().to_logical::<f64>(scale_factor);
                    self.frame_loop.push(ViewerCommand::Resize {
                        logical_width: logical.width,
                        logical_height: logical.height,
                        scale_factor,
                    });
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                self.dragging = btn_state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.zoom(amount);
            }
            WindowEvent::RedrawRequested => {
                let (
                    Some(window),
                    Some(surface),
                    Some(device),
                    Some(queue),
                    Some(surface_config),
                    Some(renderer),
                    Some(egui_winit),
                    Some(egui_renderer),
                ) = (
                    self.window.as_deref(),
                    self.surface.as_ref(),
                    self.device.as_ref(),
                    self.queue.as_ref(),
                    self.surface_config.as_mut(),
                    self.renderer.as_mut(),
                    self.egui_winit.as_mut(),
                    self.egui_renderer.as_mut(),
                )
                else {
                    return;
                };

                let mut ctx = FrameCtx {
                    window,
                    surface,
                    device,
                    queue,
                    surface_config,
                    renderer,
                    viewport: &mut self.viewport,
                    camera: &mut self.camera,
                    scene: &mut self.scene,
                    egui_ctx: &self.egui_ctx,
                    egui_winit,
                    egui_renderer,
                    pending: Vec::new(),
                };

                let ticked = self.frame_loop.tick(&mut ctx);
                let pending = std::mem::take(&mut ctx.pending);
                for command in pending {
                    self.frame_loop.push(command);
                }

                if ticked {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.dragging {
                self.camera.rotate(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(assets_dir) = cli.assets_dir {
        config.assets_dir = assets_dir;
    }
    if cli.strict_assets {
        config.asset_policy = AssetPolicy::Strict;
    }

    tracing::info!(assets_dir = %config.assets_dir.display(), "orbview starting");

    let description = compose(&config.assets_dir);
    let scene = Scene::load(description, config.asset_policy)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = ViewerApp::new(config, scene);
    event_loop.run_app(&mut app)?;

    Ok(())
}
