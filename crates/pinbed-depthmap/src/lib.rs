#![warn(missing_docs)]

//! Depth-map generation and pin layout for the pinbed pipeline.
//!
//! Samples a normalized mesh over a regular N×N grid, looking up the
//! surface height at each cell by triangle containment and barycentric
//! interpolation, then lays out one pin record per cell for the motion
//! stage.
//!
//! Both passes share a single [`Grid`], so sample coordinates and pin
//! coordinates cannot drift apart.

mod error;
mod grid;
mod map;
mod pins;

pub use error::{DepthMapError, Result};
pub use grid::{Grid, DEFAULT_GRID_SIZE};
pub use map::{DepthMap, PinHeight, TieBreak};
pub use pins::{pin_layout, PinRecord};
