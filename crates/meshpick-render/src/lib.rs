//! Rendering backend for meshpick.
//!
//! This crate provides the wgpu-based rendering engine:
//! - Surface and device setup
//! - Lit, flat, line and depth-only pipelines (WGSL)
//! - GPU buffers for the mesh, marker spheres and coordinate axes

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod buffer;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod uniforms;

pub use engine::{Frame, RenderEngine, SceneView, DEPTH_FORMAT};
pub use error::{RenderError, RenderResult};
pub use geometry::{GpuGeometry, GpuMesh};
pub use uniforms::{FrameUniforms, LightUniform, ObjectUniforms, SceneVertex};
