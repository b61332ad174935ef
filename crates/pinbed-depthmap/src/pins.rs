//! Pin layout: one record per grid cell, in machine traversal order.

use serde::{Deserialize, Serialize};

use crate::map::{DepthMap, PinHeight};

/// One pin of the bed: planar position plus target height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinRecord {
    /// Pin x position.
    pub x: f64,
    /// Pin y position.
    pub y: f64,
    /// Target height for this pin.
    pub height: PinHeight,
}

/// Lay out one [`PinRecord`] per depth-map cell in row-major order.
///
/// Coordinates come from the same [`Grid`](crate::Grid) the map was
/// sampled over, so pin placement and sampling agree by construction.
pub fn pin_layout(map: &DepthMap) -> Vec<PinRecord> {
    let grid = map.grid();
    let mut pins = Vec::with_capacity(grid.cell_count());
    for row in 0..grid.n() {
        for col in 0..grid.n() {
            let (x, y) = grid.point(row, col);
            pins.push(PinRecord {
                x,
                y,
                height: map.get(row, col),
            });
        }
    }
    pins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::map::TieBreak;
    use approx::assert_relative_eq;
    use pinbed_math::Point3;
    use pinbed_mesh::{Mesh, Triangle};

    #[test]
    fn test_pin_layout_matches_grid_points() {
        let grid = Grid::new(0.0, 10.0, 0.0, 20.0, 3).unwrap();
        let map = DepthMap::generate(&Mesh::new(vec![]), grid, TieBreak::FirstMatch);
        let pins = pin_layout(&map);

        assert_eq!(pins.len(), 9);
        // Row-major: x varies fastest
        assert_relative_eq!(pins[0].x, 0.0);
        assert_relative_eq!(pins[1].x, 5.0);
        assert_relative_eq!(pins[2].x, 10.0);
        assert_relative_eq!(pins[2].y, 0.0);
        assert_relative_eq!(pins[3].x, 0.0);
        assert_relative_eq!(pins[3].y, 10.0);
        assert_relative_eq!(pins[8].y, 20.0);
    }

    #[test]
    fn test_pin_layout_carries_heights() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(10.0, 0.0, 2.0),
            Point3::new(0.0, 10.0, 2.0),
        )
        .unwrap();
        let grid = Grid::new(0.0, 10.0, 0.0, 10.0, 2).unwrap();
        let map = DepthMap::generate(&Mesh::new(vec![tri]), grid, TieBreak::FirstMatch);
        let pins = pin_layout(&map);

        assert_eq!(pins[0].height, PinHeight::Measured(2.0));
        assert!(pins[3].height.is_undetermined());
    }
}
