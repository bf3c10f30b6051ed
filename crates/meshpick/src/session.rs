//! Window-independent viewer state and the per-frame interaction step.

use glam::Vec2;
use meshpick_core::{
    pick, ControllerEvents, FrameTransforms, InteractionController, Mesh, OrbitCamera, Options,
    PickRequest, PickResult, PointerFrame, SelectedElement, SelectionMode, SelectionState,
    SoftwareSelector, ViewportRegion,
};
use meshpick_ui::InfoPopup;

/// Everything the viewer knows apart from the window and the GPU.
pub struct Session {
    mesh: Mesh,
    pub options: Options,
    pub camera: OrbitCamera,
    controller: InteractionController,
    selection: SelectionState,
    popup: InfoPopup,
    selector: SoftwareSelector,
    transforms: FrameTransforms,
}

impl Session {
    pub fn new(mesh: Mesh, options: Options) -> Self {
        let camera = OrbitCamera::new(&options.camera);
        let transforms = FrameTransforms::capture(&camera, &options.camera);
        Self {
            mesh,
            options,
            camera,
            controller: InteractionController::new(),
            selection: SelectionState::new(),
            popup: InfoPopup::new(),
            selector: SoftwareSelector::new(),
            transforms,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn popup(&self) -> &InfoPopup {
        &self.popup
    }

    /// Transforms captured by the last [`Session::update`]. Drawing uses
    /// these so the frame matches what the pick saw.
    pub fn transforms(&self) -> &FrameTransforms {
        &self.transforms
    }

    /// Switches the selection mode. A change drops the selection and closes
    /// the popup.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if mode != self.selection.mode() {
            self.selection.set_mode(mode);
            self.popup.close();
        }
    }

    /// Runs one frame of interaction: camera control, popup dismissal and
    /// picking on a left click.
    pub fn update(&mut self, pointer: &PointerFrame, viewport: ViewportRegion) -> ControllerEvents {
        let events =
            self.controller
                .update(pointer, viewport, &mut self.camera, &self.options.camera);

        if events.left_pressed && self.popup.is_open() {
            self.popup.close();
        }

        self.transforms = FrameTransforms::capture(&self.camera, &self.options.camera);

        if events.left_clicked {
            if let Some(click) = events.click_pos {
                self.pick_at(click, viewport);
            }
        }

        self.selection.set_display_active(self.popup.is_open());
        events
    }

    /// Picks under `click` with the current transforms and opens the popup
    /// on a hit.
    pub fn pick_at(&mut self, click: Vec2, viewport: ViewportRegion) -> PickResult {
        let request = PickRequest {
            click_pos: click,
            region_radius: self.options.select_radius,
            viewport,
            mode: self.selection.mode(),
        };
        let result = pick(
            &request,
            &self.mesh,
            &self.transforms,
            &self.options.camera,
            &mut self.selector,
        );

        if self.selection.apply_pick(result, click) {
            if let Some(element) = self.selection.selected_element() {
                let text = element.describe(&self.mesh);
                log::info!("selected {text}");
                self.popup.open_at(click, text);
            }
        }
        self.selection.set_display_active(self.popup.is_open());
        result
    }

    /// The element to emphasize, only while its popup is showing.
    pub fn highlighted(&self) -> Option<SelectedElement> {
        if self.selection.display_active() {
            self.selection.selected_element()
        } else {
            None
        }
    }

    /// Puts the camera back to its configured start.
    pub fn reset_view(&mut self) {
        self.camera = OrbitCamera::new(&self.options.camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshpick_core::ButtonFrame;

    fn triangle_session() -> Session {
        let mesh = Mesh::new(
            vec![-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
            Vec::new(),
        )
        .unwrap();
        Session::new(mesh, Options::default())
    }

    #[test]
    fn test_mode_change_closes_popup() {
        let mut session = triangle_session();
        session.set_mode(SelectionMode::Face);
        session.popup.open_at(Vec2::ZERO, "triangle 0: 0 1 2".to_string());
        session.selection.set_display_active(true);

        session.set_mode(SelectionMode::Face);
        assert!(session.popup().is_open());

        session.set_mode(SelectionMode::Vertex);
        assert!(!session.popup().is_open());
        assert!(!session.selection().display_active());
    }

    #[test]
    fn test_left_press_dismisses_popup() {
        let mut session = triangle_session();
        session.popup.open_at(Vec2::ZERO, "vertex 0 (0, 0, 0)".to_string());
        let viewport = ViewportRegion::new(0, 0, 100, 100);
        let frame = PointerFrame {
            pos: Vec2::new(10.0, 10.0),
            left: ButtonFrame {
                pressed: true,
                released: false,
                down: true,
            },
            ..PointerFrame::default()
        };
        session.update(&frame, viewport);
        assert!(!session.popup().is_open());
        assert!(session.highlighted().is_none());
    }

    #[test]
    fn test_reset_view() {
        let mut session = triangle_session();
        session.camera.rotate_yaw(30.0);
        session.reset_view();
        assert_eq!(session.camera, OrbitCamera::new(&Options::default().camera));
    }
}
