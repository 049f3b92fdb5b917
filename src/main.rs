//! Cubist: rotating cube demo with runtime-swappable GLSL shader variants.

use anyhow::{anyhow, Result};
use clap::Parser;
use cubist::camera::CameraState;
use cubist::config::ShaderPaths;
use cubist::renderer::Renderer;
use cubist::shader::{compiler, ProgramRegistry};
use cubist::ui::{shader_control_panel, ShaderSelection, UiPanel};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

/// Rotating cube with swappable GLSL shader variants.
#[derive(Parser, Debug)]
#[command(name = "cubist")]
#[command(about = "Display a rotating cube whose shaders can be swapped at runtime")]
struct Args {
    /// Path to the shader configuration file
    #[arg(short, long, default_value = "shader_config.yaml")]
    config: PathBuf,

    /// Window width
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height
    #[arg(long, default_value = "600")]
    height: u32,
}

/// Application state for the event loop.
struct CubistApp {
    args: Args,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    ui: Option<UiPanel>,
    registry: ProgramRegistry<wgpu::RenderPipeline>,
    camera: CameraState,
    selection: ShaderSelection,
    pressed_keys: HashSet<KeyCode>,
    start_time: Instant,
    frame_count: u32,
    fps_last_time: Instant,
    init_failed: bool,
}

impl CubistApp {
    fn new(args: Args) -> Self {
        Self {
            args,
            window: None,
            renderer: None,
            ui: None,
            registry: ProgramRegistry::new(),
            camera: CameraState::new(),
            selection: ShaderSelection::default(),
            pressed_keys: HashSet::new(),
            start_time: Instant::now(),
            frame_count: 0,
            fps_last_time: Instant::now(),
            init_failed: false,
        }
    }

    /// Builds the full shader program registry. Individual variants that
    /// fail to compile or link are logged and skipped; only a missing
    /// renderer is an error here.
    fn build_shaders(&mut self) -> Result<()> {
        let renderer = self
            .renderer
            .as_ref()
            .ok_or_else(|| anyhow!("renderer not initialized"))?;

        let paths = ShaderPaths::load(&self.args.config);
        self.registry
            .build_all(&paths.vertex, &paths.fragment, |name, vertex_path, fragment_path| {
                compiler::create_program(name, vertex_path, fragment_path, |vertex, fragment| {
                    renderer.link_program(name, vertex, fragment)
                })
            });
        info!("shader registry ready with {} programs", self.registry.len());
        Ok(())
    }

    fn redraw(&mut self) {
        // Arrow keys rotate the cube by a fixed step per frame.
        let mut x_dir = 0.0;
        let mut y_dir = 0.0;
        if self.pressed_keys.contains(&KeyCode::ArrowLeft) {
            y_dir -= 1.0;
        }
        if self.pressed_keys.contains(&KeyCode::ArrowRight) {
            y_dir += 1.0;
        }
        if self.pressed_keys.contains(&KeyCode::ArrowUp) {
            x_dir -= 1.0;
        }
        if self.pressed_keys.contains(&KeyCode::ArrowDown) {
            x_dir += 1.0;
        }
        self.camera.apply_rotation_input(x_dir, y_dir);

        self.frame_count += 1;
        let elapsed = self.fps_last_time.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frame_count as f32 / elapsed.as_secs_f32();
            debug!("rendering at {:.2} FPS", fps);
            self.frame_count = 0;
            self.fps_last_time = Instant::now();
        }

        let Some(window) = self.window.as_ref() else {
            return;
        };
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let Some(ui) = self.ui.as_mut() else {
            return;
        };

        ui.begin_frame(window);
        let ctx = ui.context().clone();
        shader_control_panel(&ctx, &mut self.registry, &mut self.camera, &mut self.selection);
        ui.end_frame(window);

        let time = self.start_time.elapsed().as_secs_f32();
        let uniforms = self.camera.frame_uniforms(renderer.aspect_ratio(), time);

        if let Err(e) = renderer.render(self.registry.current(), uniforms, ui) {
            error!("render error: {}", e);
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for CubistApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = WindowAttributes::default()
            .with_title("Shader Demo")
            .with_inner_size(PhysicalSize::new(self.args.width, self.args.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                self.init_failed = true;
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let renderer = match Renderer::new(window.clone()) {
            Ok(renderer) => renderer,
            Err(e) => {
                error!("Failed to create renderer: {}", e);
                self.init_failed = true;
                event_loop.exit();
                return;
            }
        };
        self.ui = Some(UiPanel::new(
            renderer.device(),
            renderer.surface_format(),
            &window,
        ));
        self.renderer = Some(renderer);
        info!("Window created successfully");

        if let Err(e) = self.build_shaders() {
            error!("Initialization error: {}", e);
            self.init_failed = true;
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(window), Some(ui)) = (self.window.as_ref(), self.ui.as_mut()) {
            if ui.handle_input(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
                if let (Some(window), Some(ui)) = (self.window.as_ref(), self.ui.as_mut()) {
                    ui.resize(size.width, size.height, window.scale_factor() as f32);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                };
                self.camera.handle_scroll(scroll);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => {
                            if code == KeyCode::Escape {
                                event_loop.exit();
                            }
                            self.pressed_keys.insert(code);
                        }
                        ElementState::Released => {
                            self.pressed_keys.remove(&code);
                        }
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.registry.teardown();
        info!("Shutting down");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    info!("Starting cubist...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = CubistApp::new(args);
    event_loop.run_app(&mut app)?;

    if app.init_failed {
        return Err(anyhow!("initialization failed"));
    }
    Ok(())
}
