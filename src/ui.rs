//! egui control panel: winit/wgpu integration plus the Shader Control window.
//!
//! The panel is the only writer of the registry's current-program slot; the
//! render loop reads it afterwards on the same thread.

use crate::camera::{normalized_angle, CameraState};
use crate::shader::ProgramRegistry;
use tracing::warn;
use winit::event::WindowEvent;
use winit::window::Window;

/// UI-boundary selection state: positional indices into the registry's
/// ordered vertex/fragment name lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShaderSelection {
    pub vertex: usize,
    pub fragment: usize,
}

/// Egui lifecycle wrapper: input forwarding, frame begin/end, tessellation,
/// and the prepare/render halves of the wgpu pass.
pub struct UiPanel {
    egui_ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    clipped_primitives: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    screen_descriptor: egui_wgpu::ScreenDescriptor,
}

impl UiPanel {
    pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self {
        let size = window.inner_size();
        let egui_ctx = egui::Context::default();

        let id = egui_ctx.viewport_id();
        let state = egui_winit::State::new(egui_ctx.clone(), id, window, None, None, None);

        let renderer =
            egui_wgpu::Renderer::new(device, output_format, egui_wgpu::RendererOptions::default());

        Self {
            egui_ctx,
            state,
            renderer,
            clipped_primitives: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
            screen_descriptor: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [size.width, size.height],
                pixels_per_point: window.scale_factor() as f32,
            },
        }
    }

    /// Forwards a winit event to egui; returns `true` if egui consumed it.
    pub fn handle_input(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Begins a new egui frame. Call once per frame before building UI.
    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.state.take_egui_input(window);
        self.egui_ctx.begin_pass(raw_input);
    }

    /// Ends the egui frame, tessellating shapes for the render pass.
    pub fn end_frame(&mut self, window: &Window) {
        let egui::FullOutput {
            shapes,
            textures_delta,
            platform_output,
            ..
        } = self.egui_ctx.end_pass();

        self.state.handle_platform_output(window, platform_output);
        self.textures_delta = textures_delta;
        self.clipped_primitives = self
            .egui_ctx
            .tessellate(shapes, self.egui_ctx.pixels_per_point());
    }

    /// Shared egui context for building widgets (cheap to clone).
    pub fn context(&self) -> &egui::Context {
        &self.egui_ctx
    }

    pub fn resize(&mut self, width: u32, height: u32, scale_factor: f32) {
        self.screen_descriptor.size_in_pixels = [width, height];
        self.screen_descriptor.pixels_per_point = scale_factor;
    }

    /// Uploads egui textures and geometry ahead of the render pass.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        for (id, delta) in &self.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui buffer upload"),
        });
        let user_cmd_bufs = self.renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &self.clipped_primitives,
            &self.screen_descriptor,
        );
        let mut cmd_bufs: Vec<wgpu::CommandBuffer> = Vec::with_capacity(1 + user_cmd_bufs.len());
        cmd_bufs.push(encoder.finish());
        cmd_bufs.extend(user_cmd_bufs);
        queue.submit(cmd_bufs);

        for id in &self.textures_delta.free {
            self.renderer.free_texture(id);
        }
        self.textures_delta.set.clear();
        self.textures_delta.free.clear();
    }

    /// Records the egui render pass on top of the scene.
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, surface_view: &wgpu::TextureView) {
        let mut render_pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: surface_view,
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
            })
            .forget_lifetime();

        self.renderer.render(
            &mut render_pass,
            &self.clipped_primitives,
            &self.screen_descriptor,
        );
    }
}

/// Builds the Shader Control window.
///
/// Combo selections go through the registry's index mapping; a selection the
/// registry does not know is logged and ignored, and the prior program stays
/// active.
pub fn shader_control_panel(
    ctx: &egui::Context,
    registry: &mut ProgramRegistry<wgpu::RenderPipeline>,
    camera: &mut CameraState,
    selection: &mut ShaderSelection,
) {
    egui::Window::new("Shader Control").show(ctx, |ui| {
        ui.label(format!(
            "Current Shader: {}",
            registry.current_name().unwrap_or("<none>")
        ));
        ui.separator();

        ui.label(format!(
            "Rotation X: {:.1}°",
            normalized_angle(camera.rotation_x())
        ));
        ui.label(format!(
            "Rotation Y: {:.1}°",
            normalized_angle(camera.rotation_y())
        ));
        ui.label(format!("Camera Distance: {:.1}", camera.distance()));
        ui.separator();

        if ui.button("Reset to Default").clicked() {
            camera.reset();
            *selection = ShaderSelection::default();
            apply_selection(registry, selection);
        }
        ui.separator();

        let mut changed =
            variant_combo(ui, "Vertex Shader", registry.vertex_names(), &mut selection.vertex);
        changed |= variant_combo(
            ui,
            "Fragment Shader",
            registry.fragment_names(),
            &mut selection.fragment,
        );
        if changed {
            apply_selection(registry, selection);
        }
    });
}

fn variant_combo(ui: &mut egui::Ui, label: &str, names: &[String], index: &mut usize) -> bool {
    let selected = names.get(*index).map(String::as_str).unwrap_or("<none>");
    let mut changed = false;
    egui::ComboBox::from_label(label)
        .selected_text(selected.to_string())
        .show_ui(ui, |ui| {
            for (i, name) in names.iter().enumerate() {
                changed |= ui.selectable_value(index, i, name).changed();
            }
        });
    changed
}

fn apply_selection(
    registry: &mut ProgramRegistry<wgpu::RenderPipeline>,
    selection: &ShaderSelection,
) {
    if let Err(e) = registry.set_current_by_indices(selection.vertex, selection.fragment) {
        warn!("shader selection ignored: {}", e);
    }
}
