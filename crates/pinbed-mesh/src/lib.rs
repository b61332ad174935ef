#![warn(missing_docs)]

//! Triangle mesh model for the pinbed pipeline.
//!
//! Provides the mesh representation consumed by the depth-map stage, the
//! three normalization passes (translate to first quadrant, drop upward
//! faces, rotate about z), and STL decoding for both binary and ASCII
//! files.
//!
//! Triangles are immutable value objects; normalization passes produce a
//! new mesh rather than mutating shared state.

mod error;
mod mesh;
mod stl;
mod triangle;

pub use error::{MeshError, Result};
pub use mesh::Mesh;
pub use stl::{decode_stl, read_stl};
pub use triangle::Triangle;
