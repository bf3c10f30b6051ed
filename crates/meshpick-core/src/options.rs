//! Configuration options for meshpick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Global configuration options.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Camera defaults, limits and interaction scales.
    pub camera: CameraOptions,

    /// Half-size in pixels of the square region considered around a click.
    pub select_radius: f32,

    /// Largest side length of the square 3D viewport, in pixels.
    pub max_viewport_side: u32,

    /// Scene colors and draw toggles.
    pub scene: SceneOptions,

    /// The two point lights.
    pub lights: [LightOptions; 2],

    /// Surface material.
    pub material: MaterialOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            camera: CameraOptions::default(),
            select_radius: 1.0,
            max_viewport_side: 800,
            scene: SceneOptions::default(),
            lights: [
                LightOptions {
                    position: [2.3, 1.0, 0.23],
                    ..LightOptions::default()
                },
                LightOptions {
                    position: [-2.5, -0.65, 1.5],
                    ..LightOptions::default()
                },
            ],
            material: MaterialOptions::default(),
        }
    }
}

impl Options {
    /// Parses options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes options to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Camera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraOptions {
    /// Initial horizontal angle in degrees.
    pub yaw: f32,
    /// Initial pitch (angle from +Y) in degrees.
    pub pitch: f32,
    /// Initial view distance.
    pub distance: f32,
    /// Initial vertical field of view in degrees.
    pub fov_y: f32,
    /// Smallest allowed field of view in degrees.
    pub fov_min: f32,
    /// Largest allowed field of view in degrees.
    pub fov_max: f32,
    /// Closest allowed view distance.
    pub min_distance: f32,
    /// Near clip plane, shared by drawing and picking.
    pub near: f32,
    /// Far clip plane of the pick projection.
    pub pick_far: f32,
    /// Far clip plane of the display projection.
    pub render_far: f32,
    /// Degrees of rotation per pixel of drag.
    pub rotate_scale: f32,
    /// Distance change per wheel notch.
    pub zoom_step: f32,
    /// Translation applied to the mesh before the yaw rotation.
    pub model_offset: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            yaw: 45.0,
            pitch: 60.0,
            distance: 10.0,
            fov_y: 30.0,
            fov_min: 0.1,
            fov_max: 90.0,
            min_distance: 0.1,
            near: 0.1,
            pick_far: 20.0,
            render_far: 1000.0,
            rotate_scale: 1.0,
            zoom_step: 0.5,
            model_offset: [0.0, -0.5, 0.0],
        }
    }
}

/// Scene colors and draw toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneOptions {
    /// Background clear color (RGBA).
    pub clear_color: [f32; 4],
    /// Global ambient light (RGBA).
    pub global_ambient: [f32; 4],
    /// Wireframe line color (RGBA).
    pub wire_color: [f32; 4],
    /// Draw the coordinate helper lines.
    pub draw_coordinate: bool,
    /// Draw small spheres at the light positions.
    pub draw_lights: bool,
    /// Draw the mesh as a wireframe.
    pub wire_view: bool,
    /// In wireframe view, also show edges on the far side of the mesh.
    pub show_back_wire: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            clear_color: [0.34, 0.82, 0.82, 1.0],
            global_ambient: [0.1, 0.1, 0.1, 0.0],
            wire_color: [0.1, 0.1, 0.1, 1.0],
            draw_coordinate: false,
            draw_lights: false,
            wire_view: false,
            show_back_wire: false,
        }
    }
}

/// A point light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightOptions {
    /// World-space position.
    pub position: [f32; 3],
    /// Ambient color (RGBA).
    pub ambient: [f32; 4],
    /// Diffuse color (RGBA).
    pub diffuse: [f32; 4],
    /// Specular color (RGBA).
    pub specular: [f32; 4],
}

impl Default for LightOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 0.0],
            ambient: [0.1, 0.1, 0.1, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialOptions {
    /// Ambient reflectance (RGBA).
    pub ambient: [f32; 4],
    /// Diffuse reflectance (RGBA).
    pub diffuse: [f32; 4],
    /// Specular reflectance (RGBA).
    pub specular: [f32; 4],
    /// Specular exponent, 0..=128.
    pub shininess: f32,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        // Brass.
        Self {
            ambient: [0.329_412, 0.223_529, 0.027_451, 1.0],
            diffuse: [0.780_392, 0.568_627, 0.113_725, 1.0],
            specular: [0.992_157, 0.941_176, 0.807_843, 1.0],
            shininess: 27.897_4,
        }
    }
}
