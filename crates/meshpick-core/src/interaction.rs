//! Pointer handling for the 3D viewport.
//!
//! Turns per-frame pointer state into camera rotation, zoom and click
//! pulses. Everything is gated on where the gesture started: a press that
//! lands outside the viewport, or on a UI window, never rotates the camera
//! or produces a click, wherever it is released.

use glam::Vec2;

use crate::camera::OrbitCamera;
use crate::options::CameraOptions;
use crate::viewport::ViewportRegion;

/// State of one mouse button during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonFrame {
    /// The button went down this frame.
    pub pressed: bool,
    /// The button went up this frame.
    pub released: bool,
    /// The button is held at the end of the frame.
    pub down: bool,
}

/// Pointer input gathered over one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    /// Pointer position in window pixels.
    pub pos: Vec2,
    /// Pointer movement since the previous frame.
    pub delta: Vec2,
    pub left: ButtonFrame,
    pub right: ButtonFrame,
    /// Wheel movement in notches, positive away from the user.
    pub wheel: f32,
    /// The pointer is over a UI window.
    pub pointer_over_ui: bool,
}

/// What the controller detected this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerEvents {
    /// A left click completed inside the viewport.
    pub left_clicked: bool,
    /// A right click completed inside the viewport.
    pub right_clicked: bool,
    /// Where the click happened, when one did.
    pub click_pos: Option<Vec2>,
    /// The left button went down this frame, anywhere.
    pub left_pressed: bool,
}

/// Press tracking for one button.
#[derive(Debug, Clone, Copy, Default)]
struct PressState {
    press_pos: Option<Vec2>,
    in_viewport: bool,
    dragged: bool,
}

impl PressState {
    /// Advances the state; returns the drag delta to apply and whether a
    /// click completed.
    fn step(&mut self, button: ButtonFrame, frame: &PointerFrame, accepts: bool) -> (Vec2, bool) {
        let mut drag = Vec2::ZERO;
        if button.pressed {
            // Movement reported with the press happened before it.
            *self = Self {
                press_pos: Some(frame.pos),
                in_viewport: accepts,
                dragged: false,
            };
        } else if button.down && self.press_pos.is_some() && frame.delta != Vec2::ZERO {
            self.dragged = true;
            if self.in_viewport {
                drag = frame.delta;
            }
        }

        let mut clicked = false;
        if button.released {
            clicked = self.in_viewport && !self.dragged && self.press_pos == Some(frame.pos);
            *self = Self::default();
        }
        (drag, clicked)
    }
}

/// Translates pointer input into camera changes and click events.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    left: PressState,
    right: PressState,
}

impl InteractionController {
    /// Creates a controller with no buttons held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture that started in the viewport is in progress.
    pub fn is_dragging(&self) -> bool {
        (self.left.dragged && self.left.in_viewport)
            || (self.right.dragged && self.right.in_viewport)
    }

    /// Processes one frame of pointer input.
    ///
    /// Left drag adds `dx` to the yaw, right drag subtracts `dy` from the
    /// pitch, both scaled by `options.rotate_scale` degrees per pixel. The
    /// wheel zooms by `options.zoom_step` per notch while the pointer is in
    /// the viewport.
    pub fn update(
        &mut self,
        frame: &PointerFrame,
        viewport: ViewportRegion,
        camera: &mut OrbitCamera,
        options: &CameraOptions,
    ) -> ControllerEvents {
        let accepts = viewport.contains(frame.pos) && !frame.pointer_over_ui;

        let (left_drag, left_clicked) = self.left.step(frame.left, frame, accepts);
        let (right_drag, right_clicked) = self.right.step(frame.right, frame, accepts);

        if left_drag.x != 0.0 {
            camera.rotate_yaw(left_drag.x * options.rotate_scale);
        }
        if right_drag.y != 0.0 {
            camera.rotate_pitch(-right_drag.y * options.rotate_scale);
        }
        if frame.wheel != 0.0 && accepts {
            camera.zoom(frame.wheel * options.zoom_step);
        }

        let clicked = left_clicked || right_clicked;
        if clicked {
            log::debug!("click at ({:.0}, {:.0})", frame.pos.x, frame.pos.y);
        }
        ControllerEvents {
            left_clicked,
            right_clicked,
            click_pos: clicked.then_some(frame.pos),
            left_pressed: frame.left.pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportRegion = ViewportRegion {
        x: 600,
        y: 0,
        width: 600,
        height: 600,
    };

    const INSIDE: Vec2 = Vec2::new(900.0, 300.0);
    const OUTSIDE: Vec2 = Vec2::new(100.0, 300.0);

    struct Harness {
        controller: InteractionController,
        camera: OrbitCamera,
        options: CameraOptions,
        pos: Vec2,
    }

    impl Harness {
        fn new(pos: Vec2) -> Self {
            let options = CameraOptions::default();
            Self {
                controller: InteractionController::new(),
                camera: OrbitCamera::new(&options),
                options,
                pos,
            }
        }

        fn frame(&mut self, to: Vec2, left: ButtonFrame, right: ButtonFrame) -> ControllerEvents {
            let frame = PointerFrame {
                pos: to,
                delta: to - self.pos,
                left,
                right,
                ..Default::default()
            };
            self.pos = to;
            self.controller
                .update(&frame, VIEWPORT, &mut self.camera, &self.options)
        }

        fn wheel(&mut self, wheel: f32, over_ui: bool) -> ControllerEvents {
            let frame = PointerFrame {
                pos: self.pos,
                wheel,
                pointer_over_ui: over_ui,
                ..Default::default()
            };
            self.controller
                .update(&frame, VIEWPORT, &mut self.camera, &self.options)
        }
    }

    const PRESS: ButtonFrame = ButtonFrame {
        pressed: true,
        released: false,
        down: true,
    };
    const HOLD: ButtonFrame = ButtonFrame {
        pressed: false,
        released: false,
        down: true,
    };
    const RELEASE: ButtonFrame = ButtonFrame {
        pressed: false,
        released: true,
        down: false,
    };
    const UP: ButtonFrame = ButtonFrame {
        pressed: false,
        released: false,
        down: false,
    };

    #[test]
    fn test_click_pulses_once() {
        let mut h = Harness::new(INSIDE);
        let pressed = h.frame(INSIDE, PRESS, UP);
        assert!(!pressed.left_clicked);
        assert!(pressed.left_pressed);
        let released = h.frame(INSIDE, RELEASE, UP);
        assert!(released.left_clicked);
        assert_eq!(released.click_pos, Some(INSIDE));
        let next = h.frame(INSIDE, UP, UP);
        assert_eq!(next, ControllerEvents::default());
    }

    #[test]
    fn test_left_drag_rotates_yaw() {
        let mut h = Harness::new(INSIDE);
        let yaw = h.camera.yaw();
        h.frame(INSIDE, PRESS, UP);
        h.frame(INSIDE + Vec2::new(10.0, 4.0), HOLD, UP);
        assert!((h.camera.yaw() - (yaw + 10.0)).abs() < 1e-4);
        assert_eq!(h.camera.pitch(), 60.0);
        assert!(h.controller.is_dragging());
    }

    #[test]
    fn test_right_drag_rotates_pitch() {
        let mut h = Harness::new(INSIDE);
        h.frame(INSIDE, UP, PRESS);
        h.frame(INSIDE + Vec2::new(3.0, 15.0), UP, HOLD);
        assert!((h.camera.pitch() - 45.0).abs() < 1e-4);
        assert_eq!(h.camera.yaw(), 45.0);
    }

    #[test]
    fn test_movement_in_press_frame_is_not_drag() {
        let mut h = Harness::new(INSIDE - Vec2::new(10.0, 0.0));
        let yaw = h.camera.yaw();
        h.frame(INSIDE, PRESS, UP);
        assert!(!h.controller.is_dragging());
        let events = h.frame(INSIDE, RELEASE, UP);
        assert!(events.left_clicked);
        assert_eq!(events.click_pos, Some(INSIDE));
        assert_eq!(h.camera.yaw(), yaw);
    }

    #[test]
    fn test_drag_back_to_press_pixel_is_not_click() {
        let mut h = Harness::new(INSIDE);
        h.frame(INSIDE, PRESS, UP);
        h.frame(INSIDE + Vec2::new(5.0, 0.0), HOLD, UP);
        h.frame(INSIDE, HOLD, UP);
        let events = h.frame(INSIDE, RELEASE, UP);
        assert!(!events.left_clicked);
    }

    #[test]
    fn test_press_outside_release_inside_is_ignored() {
        let mut h = Harness::new(OUTSIDE);
        let yaw = h.camera.yaw();
        h.frame(OUTSIDE, PRESS, UP);
        h.frame(INSIDE, HOLD, UP);
        let events = h.frame(INSIDE, RELEASE, UP);
        assert!(!events.left_clicked);
        assert_eq!(h.camera.yaw(), yaw);
    }

    #[test]
    fn test_press_inside_drag_out_keeps_rotating() {
        let mut h = Harness::new(INSIDE);
        let yaw = h.camera.yaw();
        h.frame(INSIDE, PRESS, UP);
        h.frame(OUTSIDE, HOLD, UP);
        assert!((h.camera.yaw() - (yaw - 800.0).rem_euclid(360.0)).abs() < 1e-3);
    }

    #[test]
    fn test_click_outside_viewport_is_ignored() {
        let mut h = Harness::new(OUTSIDE);
        h.frame(OUTSIDE, PRESS, UP);
        let events = h.frame(OUTSIDE, RELEASE, UP);
        assert!(!events.left_clicked);
        assert_eq!(events.click_pos, None);
    }

    #[test]
    fn test_right_click_pulses() {
        let mut h = Harness::new(INSIDE);
        h.frame(INSIDE, UP, PRESS);
        let events = h.frame(INSIDE, UP, RELEASE);
        assert!(events.right_clicked);
        assert!(!events.left_clicked);
    }

    #[test]
    fn test_wheel_zooms_inside_viewport_only() {
        let mut h = Harness::new(INSIDE);
        h.wheel(2.0, false);
        assert!((h.camera.distance() - 9.0).abs() < 1e-5);
        h.wheel(2.0, true);
        assert!((h.camera.distance() - 9.0).abs() < 1e-5);

        let mut h = Harness::new(OUTSIDE);
        h.wheel(2.0, false);
        assert_eq!(h.camera.distance(), 10.0);
    }
}
