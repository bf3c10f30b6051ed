//! Orbit camera and per-frame transforms.

use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// An orbit camera described by two angles, a distance and a field of view.
///
/// The eye orbits the origin on a sphere of radius `distance`, placed by
/// `pitch` (angle from +Y). The horizontal rotation `yaw` is applied to the
/// model rather than the eye, see [`OrbitCamera::model_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation of the model in degrees, kept in [0, 360).
    yaw: f32,
    /// Angle between the eye direction and +Y in degrees, kept in [0, 360).
    pitch: f32,
    /// Distance from the eye to the origin.
    distance: f32,
    /// Vertical field of view in degrees.
    fov_y: f32,
    fov_range: (f32, f32),
    min_distance: f32,
}

impl OrbitCamera {
    /// Creates a camera from the configured initial values and limits.
    pub fn new(options: &CameraOptions) -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: options.distance,
            fov_y: options.fov_y,
            fov_range: (options.fov_min, options.fov_max),
            min_distance: options.min_distance,
        };
        camera.rotate_yaw(options.yaw);
        camera.rotate_pitch(options.pitch);
        camera.set_fov_y(options.fov_y);
        camera.zoom(0.0);
        camera
    }

    /// Horizontal angle in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch angle in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// View distance.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Vertical field of view in degrees.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Adds `degrees` to the yaw, wrapping into [0, 360).
    pub fn rotate_yaw(&mut self, degrees: f32) {
        self.yaw = wrap_degrees(self.yaw + degrees);
    }

    /// Adds `degrees` to the pitch, wrapping into [0, 360).
    pub fn rotate_pitch(&mut self, degrees: f32) {
        self.pitch = wrap_degrees(self.pitch + degrees);
    }

    /// Moves the eye `delta` closer to the origin.
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).max(self.min_distance);
    }

    /// Sets the field of view, clamped to the configured range.
    pub fn set_fov_y(&mut self, degrees: f32) {
        self.fov_y = degrees.clamp(self.fov_range.0, self.fov_range.1);
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let p = self.pitch.to_radians();
        let horizontal = self.distance * std::f32::consts::FRAC_1_SQRT_2 * p.sin();
        Vec3::new(horizontal, self.distance * p.cos(), horizontal)
    }

    /// Up vector for the look-at.
    ///
    /// At the poles +Y is parallel to the view direction, so a horizontal
    /// axis stands in; past 180 degrees the up vector flips so the view does
    /// not turn upside down.
    #[allow(clippy::float_cmp)]
    pub fn up(&self) -> Vec3 {
        if self.pitch == 0.0 {
            Vec3::new(-1.0, 0.0, -1.0)
        } else if self.pitch == 180.0 {
            Vec3::new(1.0, 0.0, 1.0)
        } else if self.pitch < 180.0 {
            Vec3::Y
        } else {
            Vec3::NEG_Y
        }
    }

    /// View matrix looking at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, self.up())
    }

    /// Perspective projection with aspect ratio 1 and depth in [0, 1].
    pub fn projection_matrix(&self, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), 1.0, near, far)
    }

    /// Model transform: yaw about +Y, then the recentering `offset`.
    pub fn model_matrix(&self, offset: Vec3) -> Mat4 {
        Mat4::from_rotation_y(self.yaw.to_radians()) * Mat4::from_translation(offset)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}

fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Transforms captured once per frame and shared by the pick pass and the
/// draw pass, so both see exactly the same geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransforms {
    /// Model matrix (yaw rotation and recentering).
    pub model: Mat4,
    /// View matrix.
    pub view: Mat4,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Eye position in world space.
    pub eye: Vec3,
}

impl FrameTransforms {
    /// Snapshots the camera.
    pub fn capture(camera: &OrbitCamera, options: &CameraOptions) -> Self {
        Self {
            model: camera.model_matrix(Vec3::from_array(options.model_offset)),
            view: camera.view_matrix(),
            fov_y: camera.fov_y(),
            eye: camera.eye(),
        }
    }

    /// Combined model-view matrix.
    pub fn model_view(&self) -> Mat4 {
        self.view * self.model
    }

    /// Perspective projection for this frame.
    pub fn projection(&self, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), 1.0, near, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat3;
    use proptest::prelude::*;

    fn camera_at(pitch: f32) -> OrbitCamera {
        let mut camera = OrbitCamera::default();
        let current = camera.pitch();
        camera.rotate_pitch(pitch - current);
        camera
    }

    fn rotation(camera: &OrbitCamera) -> Mat3 {
        Mat3::from_mat4(camera.view_matrix())
    }

    fn max_abs_diff(a: Mat3, b: Mat3) -> f32 {
        (a - b)
            .to_cols_array()
            .iter()
            .fold(0.0_f32, |m, v| m.max(v.abs()))
    }

    #[test]
    fn test_defaults() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.yaw(), 45.0);
        assert_eq!(camera.pitch(), 60.0);
        assert_eq!(camera.distance(), 10.0);
        assert_eq!(camera.fov_y(), 30.0);
    }

    #[test]
    fn test_eye_lies_on_sphere() {
        for pitch in [0.0, 30.0, 90.0, 180.0, 270.0, 359.0] {
            let camera = camera_at(pitch);
            assert!((camera.eye().length() - camera.distance()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_pitch_wraps() {
        let mut camera = camera_at(350.0);
        camera.rotate_pitch(20.0);
        assert!((camera.pitch() - 10.0).abs() < 1e-4);
        camera.rotate_pitch(-30.0);
        assert!((camera.pitch() - 340.0).abs() < 1e-4);
    }

    #[test]
    fn test_up_vector_at_poles() {
        assert_eq!(camera_at(0.0).up(), Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(camera_at(180.0).up(), Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(camera_at(90.0).up(), Vec3::Y);
        assert_eq!(camera_at(270.0).up(), Vec3::NEG_Y);
    }

    #[test]
    fn test_view_matrix_finite_at_poles() {
        for pitch in [0.0, 180.0] {
            let view = camera_at(pitch).view_matrix();
            assert!(view.is_finite(), "view degenerate at pitch {pitch}");
        }
    }

    #[test]
    fn test_pole_sweep_is_continuous() {
        // Half-degree steps through both poles.
        for center in [0.0_f32, 180.0] {
            let mut previous = rotation(&camera_at(center - 3.0));
            for step in -5..=6 {
                let camera = camera_at(center + step as f32 * 0.5);
                let current = rotation(&camera);
                let diff = max_abs_diff(previous, current);
                assert!(
                    diff < 0.05,
                    "orientation jumped by {diff} at pitch {}",
                    camera.pitch()
                );
                previous = current;
            }
        }
    }

    #[test]
    fn test_fov_clamped() {
        let mut camera = OrbitCamera::default();
        camera.set_fov_y(0.0);
        assert!((camera.fov_y() - 0.1).abs() < 1e-6);
        camera.set_fov_y(120.0);
        assert_eq!(camera.fov_y(), 90.0);
    }

    #[test]
    fn test_zoom_keeps_distance_positive() {
        let mut camera = OrbitCamera::default();
        camera.zoom(100.0);
        assert!(camera.distance() > 0.0);
    }

    #[test]
    fn test_model_matrix_recenters_then_rotates() {
        let camera = OrbitCamera::default();
        let model = camera.model_matrix(Vec3::new(0.0, -0.5, 0.0));
        let p = model.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!(p.length() < 1e-6);
    }

    #[test]
    fn test_capture_matches_camera() {
        let options = CameraOptions::default();
        let camera = OrbitCamera::new(&options);
        let frame = FrameTransforms::capture(&camera, &options);
        assert_eq!(frame.view, camera.view_matrix());
        assert_eq!(frame.eye, camera.eye());
        assert_eq!(
            frame.projection(0.1, 20.0),
            camera.projection_matrix(0.1, 20.0)
        );
    }

    proptest! {
        #[test]
        fn prop_angles_stay_normalized(start in -720.0f32..720.0, delta in -1000.0f32..1000.0) {
            let mut camera = camera_at(0.0);
            camera.rotate_pitch(start);
            camera.rotate_pitch(delta);
            camera.rotate_yaw(delta);
            prop_assert!((0.0..360.0).contains(&camera.pitch()));
            prop_assert!((0.0..360.0).contains(&camera.yaw()));
        }

        #[test]
        fn prop_view_is_always_finite(pitch in 0.0f32..360.0) {
            prop_assert!(camera_at(pitch).view_matrix().is_finite());
        }
    }
}
