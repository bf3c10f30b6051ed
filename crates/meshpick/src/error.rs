//! Errors surfaced by the viewer.

use thiserror::Error;

use meshpick_core::MeshpickError;
use meshpick_render::RenderError;

/// Anything that stops the viewer from starting or running.
#[derive(Error, Debug)]
pub enum AppError {
    /// Loading the mesh or the options failed.
    #[error(transparent)]
    Core(#[from] MeshpickError),

    /// GPU setup or presentation failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The window could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    /// The event loop could not be created or exited with an error.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Result type for the viewer.
pub type AppResult<T> = std::result::Result<T, AppError>;
