//! Error types for grid construction.

use thiserror::Error;

/// Errors that can occur while setting up the sampling grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DepthMapError {
    /// Grid resolution must be at least 2 pins per axis.
    #[error("grid resolution must be at least 2, got {0}")]
    InvalidResolution(usize),

    /// Sampling region is empty or inverted.
    #[error("invalid sampling region: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    InvalidRegion {
        /// Minimum x of the rejected region.
        x_min: f64,
        /// Maximum x of the rejected region.
        x_max: f64,
        /// Minimum y of the rejected region.
        y_min: f64,
        /// Maximum y of the rejected region.
        y_max: f64,
    },
}

/// Result type for depth-map operations.
pub type Result<T> = std::result::Result<T, DepthMapError>;
