//! Scene drawing.

use glam::{Mat4, Quat, Vec3, Vec4};
use meshpick_core::{FrameTransforms, Mesh, Options, SelectedElement, ViewportRegion};

use super::{Frame, RenderEngine};
use crate::uniforms::{FrameUniforms, ObjectUniforms};

const HIGHLIGHT_COLOR: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
const LIGHT_MARKER_COLOR: Vec4 = Vec4::new(1.0, 1.0, 0.6, 1.0);
const LIGHT_MARKER_RADIUS: f32 = 0.05;
const AXIS_COLORS: [Vec4; 3] = [
    Vec4::new(1.0, 0.0, 0.0, 1.0),
    Vec4::new(0.0, 1.0, 0.0, 1.0),
    Vec4::new(0.0, 0.0, 1.0, 1.0),
];

/// Fixed per-draw uniform slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectSlot {
    Mesh,
    Wire,
    SelectedFace,
    SelectedVertex,
    Light0,
    Light1,
    AxisX,
    AxisY,
    AxisZ,
}

impl ObjectSlot {
    pub const COUNT: u64 = 9;
    const AXES: [Self; 3] = [Self::AxisX, Self::AxisY, Self::AxisZ];
    const LIGHTS: [Self; 2] = [Self::Light0, Self::Light1];
}

/// Everything needed to draw one frame of the scene.
#[derive(Clone, Copy)]
pub struct SceneView<'a> {
    /// Transforms captured for this frame; picking uses the same snapshot.
    pub transforms: &'a FrameTransforms,
    /// Where the scene goes on the surface.
    pub viewport: ViewportRegion,
    /// Colors, lights, material and draw toggles.
    pub options: &'a Options,
    /// The mesh the selection refers to.
    pub mesh: &'a Mesh,
    /// Element to emphasize.
    pub selection: Option<SelectedElement>,
}

impl RenderEngine {
    /// Clears the surface and draws the scene into `view.viewport`.
    pub fn draw_scene(&self, frame: &mut Frame, view: &SceneView<'_>) {
        self.write_uniforms(view);

        let [r, g, b, a] = view.options.scene.clear_color.map(f64::from);
        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        if !self.viewport_fits(view.viewport) {
            log::debug!("viewport {:?} outside the surface, skipping scene", view.viewport);
            return;
        }
        let vp = view.viewport;
        pass.set_viewport(
            vp.x as f32,
            vp.y as f32,
            vp.width as f32,
            vp.height as f32,
            0.0,
            1.0,
        );
        pass.set_bind_group(0, &self.frame_bind_group, &[]);

        let scene = &view.options.scene;
        if let Some(mesh) = &self.mesh {
            pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            pass.set_index_buffer(mesh.triangle_buffer.slice(..), wgpu::IndexFormat::Uint32);
            let triangle_indices = mesh.triangle_count * 3;

            if scene.wire_view {
                if !scene.show_back_wire {
                    pass.set_pipeline(&self.pipelines.depth_prepass);
                    pass.set_bind_group(
                        1,
                        &self.object_bind_group,
                        &[self.offset(ObjectSlot::Mesh)],
                    );
                    pass.draw_indexed(0..triangle_indices, 0, 0..1);
                }
                pass.set_pipeline(&self.pipelines.lines);
                pass.set_bind_group(1, &self.object_bind_group, &[self.offset(ObjectSlot::Wire)]);
                pass.set_index_buffer(mesh.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.edge_index_count, 0, 0..1);
            } else {
                pass.set_pipeline(&self.pipelines.lit);
                pass.set_bind_group(1, &self.object_bind_group, &[self.offset(ObjectSlot::Mesh)]);
                pass.draw_indexed(0..triangle_indices, 0, 0..1);
            }

            match view.selection {
                Some(SelectedElement::Face { offset }) if offset + 3 <= triangle_indices => {
                    pass.set_pipeline(&self.pipelines.flat_triangles);
                    pass.set_bind_group(
                        1,
                        &self.object_bind_group,
                        &[self.offset(ObjectSlot::SelectedFace)],
                    );
                    pass.set_index_buffer(
                        mesh.triangle_buffer.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    pass.draw_indexed(offset..offset + 3, 0, 0..1);
                }
                Some(selected @ SelectedElement::Vertex { .. })
                    if selected.position(view.mesh).is_some() =>
                {
                    self.draw_sphere(&mut pass, ObjectSlot::SelectedVertex);
                }
                _ => {}
            }
        }

        if scene.draw_lights {
            for slot in ObjectSlot::LIGHTS {
                self.draw_sphere(&mut pass, slot);
            }
        }

        if scene.draw_coordinate {
            pass.set_pipeline(&self.pipelines.lines);
            pass.set_vertex_buffer(0, self.axes.vertex_buffer.slice(..));
            pass.set_index_buffer(self.axes.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for (i, slot) in (0u32..).zip(ObjectSlot::AXES) {
                pass.set_bind_group(1, &self.object_bind_group, &[self.offset(slot)]);
                pass.draw_indexed(i * 2..i * 2 + 2, 0, 0..1);
            }
        }
    }

    fn draw_sphere(&self, pass: &mut wgpu::RenderPass<'_>, slot: ObjectSlot) {
        pass.set_pipeline(&self.pipelines.flat_triangles);
        pass.set_vertex_buffer(0, self.sphere.vertex_buffer.slice(..));
        pass.set_index_buffer(self.sphere.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.set_bind_group(1, &self.object_bind_group, &[self.offset(slot)]);
        pass.draw_indexed(0..self.sphere.index_count, 0, 0..1);
    }

    fn offset(&self, slot: ObjectSlot) -> u32 {
        (slot as u64 * self.object_stride) as u32
    }

    fn viewport_fits(&self, vp: ViewportRegion) -> bool {
        !vp.is_empty()
            && vp.x >= 0
            && vp.y >= 0
            && vp.x as u32 + vp.width <= self.width
            && vp.y as u32 + vp.height <= self.height
    }

    fn write_uniforms(&self, view: &SceneView<'_>) {
        let uniforms = FrameUniforms::new(view.transforms, view.options);
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));

        let model = view.transforms.model;
        let scene = &view.options.scene;
        let write = |slot: ObjectSlot, transform: Mat4, color: Vec4| {
            let object = ObjectUniforms::new(transform, color);
            self.queue.write_buffer(
                &self.object_buffer,
                slot as u64 * self.object_stride,
                bytemuck::bytes_of(&object),
            );
        };

        write(ObjectSlot::Mesh, model, Vec4::from_array(view.options.material.diffuse));
        write(ObjectSlot::Wire, model, Vec4::from_array(scene.wire_color));
        write(ObjectSlot::SelectedFace, model, HIGHLIGHT_COLOR);

        if let (Some(mesh), Some(position)) = (
            &self.mesh,
            view.selection.and_then(|s| s.position(view.mesh)),
        ) {
            write(
                ObjectSlot::SelectedVertex,
                model
                    * Mat4::from_scale_rotation_translation(
                        Vec3::splat(mesh.marker_radius),
                        Quat::IDENTITY,
                        position,
                    ),
                HIGHLIGHT_COLOR,
            );
        }

        for (slot, light) in ObjectSlot::LIGHTS.into_iter().zip(&view.options.lights) {
            write(
                slot,
                Mat4::from_scale_rotation_translation(
                    Vec3::splat(LIGHT_MARKER_RADIUS),
                    Quat::IDENTITY,
                    Vec3::from_array(light.position),
                ),
                LIGHT_MARKER_COLOR,
            );
        }
        for (slot, color) in ObjectSlot::AXES.into_iter().zip(AXIS_COLORS) {
            write(slot, Mat4::IDENTITY, color);
        }
    }
}
