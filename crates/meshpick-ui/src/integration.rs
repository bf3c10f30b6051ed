//! egui on top of the wgpu surface, fed by winit events.

use egui::{ClippedPrimitive, Context, TexturesDelta};
use egui_wgpu::{Renderer, RendererOptions, ScreenDescriptor};
use winit::event::WindowEvent;
use winit::window::Window;

/// Tessellated UI for one frame, ready to paint.
pub struct UiFrame {
    primitives: Vec<ClippedPrimitive>,
    textures: TexturesDelta,
    pixels_per_point: f32,
}

impl UiFrame {
    /// Whether there is nothing to draw and no texture to update.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
            && self.textures.set.is_empty()
            && self.textures.free.is_empty()
    }
}

/// egui context, winit input state and wgpu renderer.
pub struct EguiIntegration {
    context: Context,
    winit_state: egui_winit::State,
    renderer: Renderer,
}

impl EguiIntegration {
    #[must_use]
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat, window: &Window) -> Self {
        let context = Context::default();
        context.set_visuals(egui::Visuals::dark());
        let winit_state = egui_winit::State::new(
            context.clone(),
            context.viewport_id(),
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = Renderer::new(device, target_format, RendererOptions::default());
        Self {
            context,
            winit_state,
            renderer,
        }
    }

    /// Forwards a window event. Returns true if egui wants it for itself.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.winit_state.on_window_event(window, event).consumed
    }

    /// Whether the pointer was over a panel or window in the last frame.
    pub fn pointer_over_ui(&self) -> bool {
        self.context.is_pointer_over_area()
    }

    /// Runs `build_ui` and tessellates the result.
    ///
    /// `build_ui` may run more than once per frame when egui asks for a
    /// layout rerun; only the first run sees the input events.
    pub fn run(&mut self, window: &Window, build_ui: impl FnMut(&Context)) -> UiFrame {
        let input = self.winit_state.take_egui_input(window);
        let output = self.context.run(input, build_ui);
        self.winit_state
            .handle_platform_output(window, output.platform_output);
        UiFrame {
            primitives: self
                .context
                .tessellate(output.shapes, output.pixels_per_point),
            textures: output.textures_delta,
            pixels_per_point: output.pixels_per_point,
        }
    }

    /// Paints `frame` over `target`, keeping what is already there.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        frame: UiFrame,
    ) {
        if frame.is_empty() {
            return;
        }
        let screen = ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };

        for (id, delta) in &frame.textures.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        let user_commands =
            self.renderer
                .update_buffers(device, queue, encoder, &frame.primitives, &screen);
        if !user_commands.is_empty() {
            queue.submit(user_commands);
        }

        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("ui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            })
            .forget_lifetime();
        self.renderer.render(&mut pass, &frame.primitives, &screen);
        drop(pass);

        for id in &frame.textures.free {
            self.renderer.free_texture(id);
        }
    }
}
