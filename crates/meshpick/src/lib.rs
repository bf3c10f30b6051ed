//! meshpick: a mesh viewer with vertex and face picking.
//!
//! Loads a triangle mesh, shows it under an orbit camera and lets the user
//! click vertices or triangles to inspect them.
//!
//! ```no_run
//! use meshpick::{load_mesh, run, Options};
//!
//! fn main() -> Result<(), meshpick::AppError> {
//!     let mesh = load_mesh("bunny.obj")?;
//!     run(mesh, Options::default())
//! }
//! ```
//!
//! The window-independent part of the viewer is [`Session`]: it runs the
//! interaction controller, the pick and the selection for one frame, and can
//! be driven without a GPU.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

mod app;
pub mod error;
pub mod pointer;
pub mod session;

pub use error::{AppError, AppResult};
pub use pointer::{PointerButton, PointerInput};
pub use session::Session;

pub use meshpick_core::{
    load_mesh, pick, ButtonFrame, ControllerEvents, FrameTransforms, InteractionController, Mesh,
    MeshpickError, OrbitCamera, Options, PickRequest, PickResult, PointerFrame, SelectedElement,
    SelectionMode, SelectionState, SoftwareSelector, ViewportRegion,
};
pub use glam::{Vec2, Vec3};

/// File read from the working directory for options, when present.
pub const OPTIONS_FILE: &str = "meshpick.json";

/// Mesh shown when no path is given.
pub const DEFAULT_MESH: &str = "bunny.obj";

/// Opens the viewer window for `mesh` and blocks until it is closed.
pub fn run(mesh: Mesh, options: Options) -> AppResult<()> {
    log::info!(
        "meshpick: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.face_count()
    );
    app::run_app(mesh, options)
}

/// Reads [`OPTIONS_FILE`] if it exists, otherwise returns the defaults.
pub fn load_options(path: impl AsRef<std::path::Path>) -> AppResult<Options> {
    let path = path.as_ref();
    if path.exists() {
        log::info!("loading options from {}", path.display());
        Ok(Options::load(path)?)
    } else {
        Ok(Options::default())
    }
}
