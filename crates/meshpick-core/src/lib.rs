//! Core of meshpick.
//!
//! This crate holds everything that does not need a GPU or a window:
//! - [`Mesh`] storage and the OBJ/PLY loaders
//! - the [`OrbitCamera`] and the per-frame [`FrameTransforms`] snapshot
//! - render-style picking: [`pick_matrix`], the [`SelectBackend`] hit-test
//!   interface, the [`SoftwareSelector`] and hit record resolution
//! - the [`InteractionController`] and [`SelectionState`]
//! - [`Options`] loaded from JSON

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
// Mesh sizes fit comfortably in u32/f32
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

pub mod camera;
pub mod error;
pub mod hit_record;
pub mod interaction;
pub mod loader;
pub mod mesh;
pub mod options;
pub mod pick;
pub mod select;
pub mod selection;
pub mod sphere;
pub mod viewport;

pub use camera::{FrameTransforms, OrbitCamera};
pub use error::{MeshpickError, Result};
pub use hit_record::{HitBuffer, HitRecord};
pub use interaction::{ButtonFrame, ControllerEvents, InteractionController, PointerFrame};
pub use loader::{load_mesh, load_obj_from_reader, load_ply_from_reader};
pub use mesh::Mesh;
pub use options::{CameraOptions, LightOptions, MaterialOptions, Options, SceneOptions};
pub use pick::{pick, pick_matrix, resolve_nearest, PickRequest, PickResult, SelectionMode};
pub use select::{SelectBackend, SelectScope, SoftwareSelector};
pub use selection::{SelectedElement, SelectionState};
pub use sphere::{uv_sphere, SphereMesh};
pub use viewport::ViewportRegion;

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
