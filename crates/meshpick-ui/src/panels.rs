//! UI panel builders.

use egui::{Align2, Area, CollapsingHeader, Context, DragValue, Id, SidePanel, Slider, Ui};
use glam::Vec2;
use meshpick_core::{
    LightOptions, MaterialOptions, Mesh, OrbitCamera, Options, SceneOptions, SelectionMode,
    ViewportRegion,
};

/// Tabs of the lighting section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlTab {
    #[default]
    Global,
    Material,
    Light0,
    Light1,
}

impl ControlTab {
    const ALL: [Self; 4] = [Self::Global, Self::Material, Self::Light0, Self::Light1];

    fn label(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Material => "Material",
            Self::Light0 => "Light 0",
            Self::Light1 => "Light 1",
        }
    }
}

/// What the control panel edits.
pub struct ControlPanel<'a> {
    pub options: &'a mut Options,
    pub camera: &'a mut OrbitCamera,
    pub mode: &'a mut SelectionMode,
    pub tab: &'a mut ControlTab,
}

/// Builds the left control panel.
pub fn build_control_panel(ctx: &Context, panel: ControlPanel<'_>) {
    let ControlPanel {
        options,
        camera,
        mode,
        tab,
    } = panel;

    SidePanel::left("meshpick_control_panel")
        .default_width(280.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("meshpick");
            ui.separator();

            build_view_section(ui, camera, options);
            build_selection_section(ui, mode, &mut options.select_radius);
            build_scene_section(ui, &mut options.scene);

            CollapsingHeader::new("Lighting")
                .default_open(true)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for t in ControlTab::ALL {
                            ui.selectable_value(tab, t, t.label());
                        }
                    });
                    ui.separator();
                    match *tab {
                        ControlTab::Global => {
                            build_global_light_section(ui, &mut options.scene);
                        }
                        ControlTab::Material => {
                            build_material_section(ui, &mut options.material);
                        }
                        ControlTab::Light0 => {
                            build_light_section(ui, &mut options.lights[0]);
                        }
                        ControlTab::Light1 => {
                            build_light_section(ui, &mut options.lights[1]);
                        }
                    }
                });
        });
}

/// Builds the view section: field of view, distance, angles and reset.
/// Returns true if the camera changed.
pub fn build_view_section(ui: &mut Ui, camera: &mut OrbitCamera, options: &Options) -> bool {
    let mut changed = false;

    CollapsingHeader::new("View")
        .default_open(true)
        .show(ui, |ui| {
            let mut fov = camera.fov_y();
            if ui
                .add(
                    Slider::new(&mut fov, options.camera.fov_min..=options.camera.fov_max)
                        .text("fov")
                        .suffix("°"),
                )
                .changed()
            {
                camera.set_fov_y(fov);
                changed = true;
            }

            let mut distance = camera.distance();
            ui.horizontal(|ui| {
                ui.label("Distance:");
                if ui
                    .add(
                        DragValue::new(&mut distance)
                            .speed(0.05)
                            .range(options.camera.min_distance..=f32::MAX),
                    )
                    .changed()
                {
                    camera.zoom(camera.distance() - distance);
                    changed = true;
                }
            });

            ui.label(format!(
                "yaw {:.1}°  pitch {:.1}°",
                camera.yaw(),
                camera.pitch()
            ));

            if ui.button("Reset View").clicked() {
                *camera = OrbitCamera::new(&options.camera);
                changed = true;
            }
        });

    changed
}

/// Builds the selection section: mode radio buttons and pick region size.
/// Returns true if the mode changed.
pub fn build_selection_section(ui: &mut Ui, mode: &mut SelectionMode, radius: &mut f32) -> bool {
    let mut changed = false;

    CollapsingHeader::new("Selection")
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for (value, label) in [
                    (SelectionMode::None, "None"),
                    (SelectionMode::Vertex, "Vertex"),
                    (SelectionMode::Face, "Face"),
                ] {
                    changed |= ui.radio_value(mode, value, label).changed();
                }
            });
            ui.add(
                Slider::new(radius, 0.5..=10.0)
                    .step_by(0.5)
                    .text("select radius"),
            );
        });

    changed
}

/// Builds the draw toggles and colors.
pub fn build_scene_section(ui: &mut Ui, scene: &mut SceneOptions) {
    CollapsingHeader::new("Scene")
        .default_open(false)
        .show(ui, |ui| {
            ui.checkbox(&mut scene.draw_coordinate, "Coordinate axes");
            ui.checkbox(&mut scene.draw_lights, "Light positions");
            ui.checkbox(&mut scene.wire_view, "Wireframe");
            ui.add_enabled(
                scene.wire_view,
                egui::Checkbox::new(&mut scene.show_back_wire, "Show back edges"),
            );
            color_row(ui, "Background:", &mut scene.clear_color);
            color_row(ui, "Wire:", &mut scene.wire_color);
        });
}

fn build_global_light_section(ui: &mut Ui, scene: &mut SceneOptions) {
    color_row(ui, "Ambient:", &mut scene.global_ambient);
}

/// Builds the material editor.
pub fn build_material_section(ui: &mut Ui, material: &mut MaterialOptions) {
    color_row(ui, "Ambient:", &mut material.ambient);
    color_row(ui, "Diffuse:", &mut material.diffuse);
    color_row(ui, "Specular:", &mut material.specular);
    ui.add(Slider::new(&mut material.shininess, 0.0..=128.0).text("shininess"));
}

/// Builds a point light editor.
pub fn build_light_section(ui: &mut Ui, light: &mut LightOptions) {
    ui.horizontal(|ui| {
        ui.label("Position:");
        for c in &mut light.position {
            ui.add(DragValue::new(c).speed(0.05));
        }
    });
    color_row(ui, "Ambient:", &mut light.ambient);
    color_row(ui, "Diffuse:", &mut light.diffuse);
    color_row(ui, "Specular:", &mut light.specular);
}

fn color_row(ui: &mut Ui, label: &str, color: &mut [f32; 4]) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.color_edit_button_rgba_unmultiplied(color);
    });
}

/// Per-frame values shown in the overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlayStats {
    /// Pointer position in window pixels.
    pub mouse: Vec2,
    pub viewport: ViewportRegion,
    pub fps: f32,
}

/// Camera, mesh and pointer summary for the overlay.
pub fn status_text(
    camera: &OrbitCamera,
    mesh: &Mesh,
    mode: SelectionMode,
    stats: &OverlayStats,
) -> String {
    let vp = stats.viewport;
    format!(
        "{} vertices, {} triangles | \
         yaw {:.0}° pitch {:.0}° dist {:.1} fov {:.1}° | pick: {mode:?}\n\
         mouse ({:.0}, {:.0}) | viewport {}x{} at ({}, {}) | {:.0} fps",
        mesh.vertex_count(),
        mesh.face_count(),
        camera.yaw(),
        camera.pitch(),
        camera.distance(),
        camera.fov_y(),
        stats.mouse.x,
        stats.mouse.y,
        vp.width,
        vp.height,
        vp.x,
        vp.y,
        stats.fps,
    )
}

/// Draws `text` in the bottom-left corner, over everything.
pub fn build_status_overlay(ctx: &Context, text: &str) {
    Area::new(Id::new("meshpick_status_overlay"))
        .anchor(Align2::LEFT_BOTTOM, [8.0, -8.0])
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(text).small().monospace());
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let mesh = Mesh::new(vec![0.0; 9], vec![0, 1, 2], Vec::new()).unwrap();
        let stats = OverlayStats {
            mouse: Vec2::new(12.0, 34.0),
            viewport: ViewportRegion::new(400, 0, 800, 800),
            fps: 59.6,
        };
        let text = status_text(&OrbitCamera::default(), &mesh, SelectionMode::Face, &stats);
        let mut lines = text.lines();
        let first = lines.next().unwrap();
        assert!(first.starts_with("3 vertices, 1 triangles"));
        assert!(first.contains("yaw 45° pitch 60°"));
        assert!(first.ends_with("pick: Face"));
        assert_eq!(
            lines.next().unwrap(),
            "mouse (12, 34) | viewport 800x800 at (400, 0) | 60 fps"
        );
    }

    #[test]
    fn test_control_panel_builds_headless() {
        let ctx = Context::default();
        let mut options = Options::default();
        let mut camera = OrbitCamera::new(&options.camera);
        let mut mode = SelectionMode::Vertex;
        let mut tab = ControlTab::Light1;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            build_control_panel(
                ctx,
                ControlPanel {
                    options: &mut options,
                    camera: &mut camera,
                    mode: &mut mode,
                    tab: &mut tab,
                },
            );
            build_status_overlay(ctx, "status");
        });
        // No input, so nothing changes.
        assert_eq!(mode, SelectionMode::Vertex);
        assert_eq!(options, Options::default());
        assert_eq!(camera, OrbitCamera::default());
    }
}
