//! Camera control through the session with accumulated pointer input.

use meshpick::*;
use proptest::prelude::*;

fn viewport() -> ViewportRegion {
    ViewportRegion::new(480, 0, 800, 800)
}

fn session() -> Session {
    let mesh = Mesh::new(
        vec![-1.0, 0.0, -1.0, 1.0, 0.0, -1.0, 0.0, 0.0, 1.0],
        vec![0, 1, 2],
        Vec::new(),
    )
    .unwrap();
    Session::new(mesh, Options::default())
}

/// Drags `button` from `from` by `steps`, one frame per step.
fn drag(
    session: &mut Session,
    input: &mut PointerInput,
    button: PointerButton,
    from: Vec2,
    steps: &[Vec2],
    over_ui: bool,
) {
    input.cursor_moved(from);
    let _ = input.take_frame(over_ui);
    input.button(button, true);
    session.update(&input.take_frame(over_ui), viewport());
    let mut pos = from;
    for step in steps {
        pos += *step;
        input.cursor_moved(pos);
        session.update(&input.take_frame(false), viewport());
    }
    input.button(button, false);
    session.update(&input.take_frame(false), viewport());
}

#[test]
fn test_left_drag_rotates_yaw() {
    let mut s = session();
    let mut input = PointerInput::new();
    let yaw = s.camera.yaw();
    drag(
        &mut s,
        &mut input,
        PointerButton::Left,
        Vec2::new(800.0, 400.0),
        &[Vec2::new(10.0, 3.0), Vec2::new(5.0, -1.0)],
        false,
    );
    assert!((s.camera.yaw() - (yaw + 15.0)).abs() < 1e-4);
    assert!((s.camera.pitch() - 60.0).abs() < 1e-4);
    assert!(!s.popup().is_open());
}

#[test]
fn test_right_drag_rotates_pitch() {
    let mut s = session();
    let mut input = PointerInput::new();
    drag(
        &mut s,
        &mut input,
        PointerButton::Right,
        Vec2::new(800.0, 400.0),
        &[Vec2::new(0.0, 20.0)],
        false,
    );
    assert!((s.camera.pitch() - 40.0).abs() < 1e-4);
    assert!((s.camera.yaw() - 45.0).abs() < 1e-4);
}

#[test]
fn test_move_and_press_in_one_frame_still_clicks() {
    let mut s = session();
    let mut input = PointerInput::new();
    let yaw = s.camera.yaw();

    input.cursor_moved(Vec2::new(890.0, 300.0));
    s.update(&input.take_frame(false), viewport());

    // The cursor moves and the button goes down before the next frame.
    input.cursor_moved(Vec2::new(900.0, 300.0));
    input.button(PointerButton::Left, true);
    let pressed = s.update(&input.take_frame(false), viewport());
    assert!(pressed.left_pressed);

    input.button(PointerButton::Left, false);
    let released = s.update(&input.take_frame(false), viewport());
    assert!(released.left_clicked);
    assert_eq!(released.click_pos, Some(Vec2::new(900.0, 300.0)));
    assert!((s.camera.yaw() - yaw).abs() < 1e-6);
}

#[test]
fn test_drag_starting_in_panel_is_ignored() {
    let mut s = session();
    let mut input = PointerInput::new();
    let before = s.camera.clone();
    // Starts left of the viewport and ends inside it.
    drag(
        &mut s,
        &mut input,
        PointerButton::Left,
        Vec2::new(400.0, 400.0),
        &[Vec2::new(200.0, 0.0)],
        false,
    );
    assert_eq!(s.camera, before);
}

#[test]
fn test_drag_starting_over_ui_window_is_ignored() {
    let mut s = session();
    let mut input = PointerInput::new();
    let before = s.camera.clone();
    drag(
        &mut s,
        &mut input,
        PointerButton::Left,
        Vec2::new(900.0, 400.0),
        &[Vec2::new(30.0, 0.0)],
        true,
    );
    assert_eq!(s.camera, before);
}

#[test]
fn test_drag_does_not_pick() {
    let mut s = session();
    let mut input = PointerInput::new();
    s.set_mode(SelectionMode::Face);
    drag(
        &mut s,
        &mut input,
        PointerButton::Left,
        Vec2::new(880.0, 400.0),
        &[Vec2::new(4.0, 0.0), Vec2::new(-4.0, 0.0)],
        false,
    );
    assert_eq!(s.selection().selected_id(), None);
    assert_eq!(s.selection().last_hit_count(), 0);
}

#[test]
fn test_wheel_zooms_only_in_viewport() {
    let mut s = session();
    let mut input = PointerInput::new();
    let distance = s.camera.distance();

    input.cursor_moved(Vec2::new(100.0, 100.0));
    input.wheel_lines(2.0);
    s.update(&input.take_frame(false), viewport());
    assert!((s.camera.distance() - distance).abs() < 1e-6);

    input.cursor_moved(Vec2::new(900.0, 100.0));
    input.wheel_lines(2.0);
    s.update(&input.take_frame(false), viewport());
    assert!((s.camera.distance() - (distance - 1.0)).abs() < 1e-5);
}

proptest! {
    #[test]
    fn test_pitch_sweep_has_no_flip(start in 150.0_f32..175.0, steps in 10usize..40) {
        let mut s = session();
        let mut input = PointerInput::new();
        s.camera.rotate_pitch(start - s.camera.pitch());
        s.update(&input.take_frame(false), viewport());

        input.cursor_moved(Vec2::new(800.0, 400.0));
        input.button(PointerButton::Right, true);
        s.update(&input.take_frame(false), viewport());

        let mut pos = Vec2::new(800.0, 400.0);
        let mut previous = s.transforms().view;
        for _ in 0..steps {
            // Dragging up one pixel raises the pitch by one degree.
            pos.y -= 1.0;
            input.cursor_moved(pos);
            s.update(&input.take_frame(false), viewport());
            let view = s.transforms().view;
            let forward_change = (view.z_axis - previous.z_axis).length();
            let up_change = (view.y_axis - previous.y_axis).length();
            prop_assert!(forward_change < 0.1, "forward jumped by {forward_change}");
            prop_assert!(up_change < 0.1, "up jumped by {up_change}");
            previous = view;
        }
    }
}
