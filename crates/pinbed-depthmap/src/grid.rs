//! The shared sampling grid.

use serde::{Deserialize, Serialize};

use crate::error::{DepthMapError, Result};

/// Default pin-bed resolution: 10×10 pins.
pub const DEFAULT_GRID_SIZE: usize = 10;

/// A regular N×N sample grid over a rectangular region.
///
/// This is the single source of grid-point coordinates for both the
/// depth-map generator and the pin layout: step `(max - min) / (n - 1)`
/// per axis, row-major iteration with x varying by column and y by row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Region bounds `[x_min, y_min, x_max, y_max]`.
    bounds: [f64; 4],
    /// Pins per axis.
    n: usize,
}

impl Grid {
    /// Create a grid over `[x_min, x_max] × [y_min, y_max]` with `n` pins
    /// per axis.
    ///
    /// `n <= 1` is rejected: the step formula divides by `n - 1`, and a
    /// single-pin bed has no defined spacing. An empty or inverted region
    /// is rejected as well.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, n: usize) -> Result<Self> {
        if n <= 1 {
            return Err(DepthMapError::InvalidResolution(n));
        }
        if !(x_min < x_max) || !(y_min < y_max) {
            return Err(DepthMapError::InvalidRegion {
                x_min,
                x_max,
                y_min,
                y_max,
            });
        }
        Ok(Self {
            bounds: [x_min, y_min, x_max, y_max],
            n,
        })
    }

    /// Pins per axis.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of cells (`n * n`).
    pub fn cell_count(&self) -> usize {
        self.n * self.n
    }

    /// Region bounds `[x_min, y_min, x_max, y_max]`.
    pub fn bounds(&self) -> [f64; 4] {
        self.bounds
    }

    /// Spacing between samples along x.
    pub fn step_x(&self) -> f64 {
        (self.bounds[2] - self.bounds[0]) / (self.n - 1) as f64
    }

    /// Spacing between samples along y.
    pub fn step_y(&self) -> f64 {
        (self.bounds[3] - self.bounds[1]) / (self.n - 1) as f64
    }

    /// The `(x, y)` coordinates of the cell at `(row, col)`.
    pub fn point(&self, row: usize, col: usize) -> (f64, f64) {
        let x = self.bounds[0] + col as f64 * self.step_x();
        let y = self.bounds[1] + row as f64 * self.step_y();
        (x, y)
    }

    /// Row-major cell index for `(row, col)`.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.n + col
    }
}
