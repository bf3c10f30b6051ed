//! Error types for meshpick.

use thiserror::Error;

/// The main error type for meshpick core operations.
#[derive(Error, Debug)]
pub enum MeshpickError {
    /// The mesh file extension is not one we can read.
    #[error("unsupported mesh format '{0}' (expected .obj or .ply)")]
    UnsupportedFormat(String),

    /// The PLY file could not be parsed.
    #[error("PLY parse error: {0}")]
    PlyParse(String),

    /// The OBJ file could not be loaded.
    #[error("OBJ load error: {0}")]
    ObjLoad(#[from] tobj::LoadError),

    /// The mesh data is structurally wrong.
    #[error("malformed mesh: {0}")]
    MalformedMesh(String),

    /// A triangle refers to a vertex that does not exist.
    #[error("face index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// A hit record stream ended in the middle of a record.
    #[error("hit buffer truncated at word {offset} (length {len})")]
    TruncatedHitBuffer { offset: usize, len: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for meshpick operations.
pub type Result<T> = std::result::Result<T, MeshpickError>;
