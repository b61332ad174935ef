//! Error types for mesh construction and decoding.

use thiserror::Error;

/// Errors that can occur while building or decoding a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Mesh has no triangles where at least one is required.
    #[error("mesh is empty")]
    EmptyMesh,

    /// Triangle has zero area, so its normal is undefined.
    #[error("degenerate triangle (zero area)")]
    DegenerateTriangle,

    /// STL data does not match the binary or ASCII format.
    #[error("malformed STL: {0}")]
    MalformedStl(String),

    /// Reading the input failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
