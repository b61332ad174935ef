//! Depth-map generation by per-cell triangle lookup.

use pinbed_mesh::{Mesh, Triangle};
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Heights within this distance of the zero plane count as already at the
/// machine's home position.
const BASE_EPS: f64 = 1e-9;

/// The height of one grid cell.
///
/// A tagged type instead of sentinel floats (`0` = no motion, `-1` = no
/// sample), which overload the height channel with control meaning and
/// let sentinels leak into averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PinHeight {
    /// Surface height sampled from a containing triangle.
    Measured(f64),
    /// Sampled height is at the zero plane; the pin needs no motion.
    AtBase,
    /// No triangle's footprint contains the sample point.
    Undetermined,
}

impl PinHeight {
    fn classify(z: f64) -> Self {
        if z.abs() <= BASE_EPS {
            PinHeight::AtBase
        } else {
            PinHeight::Measured(z)
        }
    }

    /// The measured height, if any.
    pub fn measured(&self) -> Option<f64> {
        match self {
            PinHeight::Measured(z) => Some(*z),
            _ => None,
        }
    }

    /// Whether no triangle claimed this cell.
    pub fn is_undetermined(&self) -> bool {
        matches!(self, PinHeight::Undetermined)
    }
}

/// Policy for cells covered by more than one triangle footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreak {
    /// First containing triangle in mesh order wins. Ordering-dependent;
    /// the default contract.
    #[default]
    FirstMatch,
    /// Highest interpolated z wins; the physically meaningful choice for
    /// multi-layer shells.
    HighestZ,
}

/// An N×N grid of sampled surface heights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthMap {
    grid: Grid,
    /// Row-major cells, indexed by [`Grid::index`].
    cells: Vec<PinHeight>,
}

impl DepthMap {
    /// Sample `mesh` at every grid point.
    ///
    /// Each cell scans the mesh's triangles in order; the containing
    /// triangle chosen by `tie_break` provides the height as the
    /// barycentric-weighted average of its vertex z values. Cells outside
    /// every footprint are [`PinHeight::Undetermined`]; an empty mesh
    /// yields an all-undetermined map.
    pub fn generate(mesh: &Mesh, grid: Grid, tie_break: TieBreak) -> Self {
        let mut cells = Vec::with_capacity(grid.cell_count());
        for row in 0..grid.n() {
            for col in 0..grid.n() {
                let (x, y) = grid.point(row, col);
                cells.push(sample_cell(mesh.triangles(), x, y, tie_break));
            }
        }
        Self { grid, cells }
    }

    /// The grid this map was sampled over.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The height at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> PinHeight {
        self.cells[self.grid.index(row, col)]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[PinHeight] {
        &self.cells
    }
}

fn sample_cell(triangles: &[Triangle], x: f64, y: f64, tie_break: TieBreak) -> PinHeight {
    match tie_break {
        TieBreak::FirstMatch => triangles
            .iter()
            .find_map(|t| t.height_at(x, y))
            .map_or(PinHeight::Undetermined, PinHeight::classify),
        TieBreak::HighestZ => triangles
            .iter()
            .filter_map(|t| t.height_at(x, y))
            .max_by(|a, b| a.total_cmp(b))
            .map_or(PinHeight::Undetermined, PinHeight::classify),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pinbed_math::Point3;

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
        Triangle::new(
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        )
        .unwrap()
    }

    /// Two triangles covering the square [0,10]² at a constant height.
    fn flat_square(z: f64) -> Mesh {
        Mesh::new(vec![
            tri([0.0, 0.0, z], [10.0, 0.0, z], [10.0, 10.0, z]),
            tri([0.0, 0.0, z], [10.0, 10.0, z], [0.0, 10.0, z]),
        ])
    }

    fn grid10() -> Grid {
        Grid::new(0.0, 10.0, 0.0, 10.0, 10).unwrap()
    }

    #[test]
    fn test_flat_square_every_cell_measured() {
        let map = DepthMap::generate(&flat_square(5.0), grid10(), TieBreak::FirstMatch);
        for cell in map.cells() {
            assert_relative_eq!(cell.measured().unwrap(), 5.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_flat_square_at_zero_is_at_base() {
        let map = DepthMap::generate(&flat_square(0.0), grid10(), TieBreak::FirstMatch);
        for cell in map.cells() {
            assert_eq!(*cell, PinHeight::AtBase);
        }
    }

    #[test]
    fn test_empty_mesh_is_all_undetermined() {
        let map = DepthMap::generate(&Mesh::new(vec![]), grid10(), TieBreak::FirstMatch);
        assert_eq!(map.cells().len(), 100);
        assert!(map.cells().iter().all(|c| c.is_undetermined()));
    }

    #[test]
    fn test_outside_footprint_is_undetermined() {
        // One triangle in the lower-left corner of a 2x2 grid over [0,10]²:
        // only the (0,0) sample is covered.
        let mesh = Mesh::new(vec![tri(
            [0.0, 0.0, 3.0],
            [4.0, 0.0, 3.0],
            [0.0, 4.0, 3.0],
        )]);
        let grid = Grid::new(0.0, 10.0, 0.0, 10.0, 2).unwrap();
        let map = DepthMap::generate(&mesh, grid, TieBreak::FirstMatch);
        assert_relative_eq!(map.get(0, 0).measured().unwrap(), 3.0, epsilon = 1e-9);
        assert!(map.get(0, 1).is_undetermined());
        assert!(map.get(1, 0).is_undetermined());
        assert!(map.get(1, 1).is_undetermined());
    }

    #[test]
    fn test_sample_at_mesh_vertex_returns_vertex_z() {
        let mesh = Mesh::new(vec![tri(
            [0.0, 0.0, 1.0],
            [10.0, 0.0, 4.0],
            [0.0, 10.0, 8.0],
        )]);
        let grid = Grid::new(0.0, 10.0, 0.0, 10.0, 2).unwrap();
        let map = DepthMap::generate(&mesh, grid, TieBreak::FirstMatch);
        assert_relative_eq!(map.get(0, 0).measured().unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(map.get(0, 1).measured().unwrap(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(map.get(1, 0).measured().unwrap(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tie_break_first_match_vs_highest_z() {
        // Two stacked full-cover squares, lower one first in mesh order.
        let mut triangles = flat_square(2.0).triangles().to_vec();
        triangles.extend(flat_square(7.0).triangles().to_vec());
        let mesh = Mesh::new(triangles);

        let first = DepthMap::generate(&mesh, grid10(), TieBreak::FirstMatch);
        assert_relative_eq!(first.get(4, 4).measured().unwrap(), 2.0, epsilon = 1e-9);

        let highest = DepthMap::generate(&mesh, grid10(), TieBreak::HighestZ);
        assert_relative_eq!(highest.get(4, 4).measured().unwrap(), 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_depth_map_serde_round_trip() {
        let map = DepthMap::generate(&flat_square(5.0), grid10(), TieBreak::FirstMatch);
        let json = serde_json::to_string(&map).unwrap();
        let parsed: DepthMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }
}
