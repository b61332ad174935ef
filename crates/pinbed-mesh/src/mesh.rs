//! Ordered triangle collection and the normalization passes.

use pinbed_math::{Point3, Vec3};

use crate::error::{MeshError, Result};
use crate::triangle::Triangle;

/// An ordered collection of triangles.
///
/// Order is preserved by every pass; the depth-map stage's first-match
/// policy depends on it. Normalization passes consume the mesh and return
/// a new one, so the pipeline reads as a chain:
///
/// ```
/// # use pinbed_mesh::{Mesh, Triangle};
/// # use pinbed_math::Point3;
/// # let tri = Triangle::new(
/// #     Point3::new(1.0, 1.0, 1.0),
/// #     Point3::new(2.0, 1.0, 1.0),
/// #     Point3::new(1.0, 2.0, 2.0),
/// # ).unwrap();
/// # let mesh = Mesh::new(vec![tri]);
/// let normalized = mesh
///     .translate_to_first_quadrant()?
///     .drop_upward_faces()
///     .rotate_z(0.0);
/// # Ok::<(), pinbed_mesh::MeshError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a mesh from an ordered triangle sequence.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// The triangles in order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate over every vertex of every triangle.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3> {
        self.triangles.iter().flat_map(|t| t.vertices().iter())
    }

    /// Minimum corner of the axis-aligned bounding box.
    ///
    /// Linear scan over all vertices; fails with [`MeshError::EmptyMesh`]
    /// on an empty mesh.
    pub fn aabb_min(&self) -> Result<Point3> {
        if self.triangles.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        for v in self.vertices() {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
        }
        Ok(min)
    }

    /// Maximum corner of the axis-aligned bounding box.
    pub fn aabb_max(&self) -> Result<Point3> {
        if self.triangles.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in self.vertices() {
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }
        Ok(max)
    }

    /// Translate the mesh so its AABB minimum corner lands on the origin.
    pub fn translate_to_first_quadrant(self) -> Result<Mesh> {
        let min = self.aabb_min()?;
        let delta = Vec3::new(-min.x, -min.y, -min.z);
        Ok(Mesh {
            triangles: self
                .triangles
                .into_iter()
                .map(|t| t.translated(&delta))
                .collect(),
        })
    }

    /// Remove every upward-facing triangle (`normal.z > 0`), preserving the
    /// relative order of the rest.
    ///
    /// This treats the mesh as a closed, shelled solid whose downward
    /// faces form a single-valued height field; the upward faces are the
    /// back of the shell.
    pub fn drop_upward_faces(self) -> Mesh {
        Mesh {
            triangles: self
                .triangles
                .into_iter()
                .filter(|t| t.normal().z <= 0.0)
                .collect(),
        }
    }

    /// Rotate every vertex by `angle` radians about the z axis.
    ///
    /// Intended for choosing an orientation that minimizes z variation;
    /// `angle = 0` is the identity. Angle selection is up to the caller.
    pub fn rotate_z(self, angle: f64) -> Mesh {
        if angle == 0.0 {
            return self;
        }
        Mesh {
            triangles: self
                .triangles
                .into_iter()
                .map(|t| t.rotated_z(angle))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
        Triangle::new(
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        )
        .unwrap()
    }

    fn sample_mesh() -> Mesh {
        Mesh::new(vec![
            tri([1.0, 2.0, 3.0], [4.0, 2.0, 3.0], [1.0, 5.0, 3.0]),
            tri([2.0, 2.0, 4.0], [2.0, 6.0, 4.0], [6.0, 2.0, 4.0]),
        ])
    }

    #[test]
    fn test_aabb_min_bounds_every_vertex() {
        let mesh = sample_mesh();
        let min = mesh.aabb_min().unwrap();
        for v in mesh.vertices() {
            assert!(min.x <= v.x && min.y <= v.y && min.z <= v.z);
        }
        // Attained on each axis by some vertex
        assert_relative_eq!(min.x, 1.0);
        assert_relative_eq!(min.y, 2.0);
        assert_relative_eq!(min.z, 3.0);
    }

    #[test]
    fn test_aabb_on_empty_mesh_fails() {
        let mesh = Mesh::new(vec![]);
        assert!(matches!(mesh.aabb_min(), Err(MeshError::EmptyMesh)));
        assert!(matches!(mesh.aabb_max(), Err(MeshError::EmptyMesh)));
    }

    #[test]
    fn test_translate_to_first_quadrant_zeroes_min() {
        let mesh = sample_mesh().translate_to_first_quadrant().unwrap();
        let min = mesh.aabb_min().unwrap();
        assert_relative_eq!(min.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_drop_upward_faces_exact_and_ordered() {
        // Upward, downward, upward, downward
        let up1 = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let down1 = tri([0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]);
        let up2 = tri([2.0, 0.0, 0.0], [3.0, 0.0, 0.0], [2.0, 1.0, 0.0]);
        let down2 = tri([2.0, 0.0, 1.0], [2.0, 1.0, 1.0], [3.0, 0.0, 1.0]);
        assert!(up1.normal().z > 0.0);
        assert!(down1.normal().z < 0.0);

        let mesh = Mesh::new(vec![up1, down1.clone(), up2, down2.clone()]);
        let planar = mesh.drop_upward_faces();
        assert_eq!(planar.triangles(), &[down1, down2]);
    }

    #[test]
    fn test_rotate_z_zero_is_identity() {
        let mesh = sample_mesh();
        let rotated = mesh.clone().rotate_z(0.0);
        assert_eq!(rotated, mesh);
    }

    #[test]
    fn test_rotate_z_preserves_z_and_count() {
        let mesh = sample_mesh();
        let rotated = mesh.clone().rotate_z(1.234);
        assert_eq!(rotated.len(), mesh.len());
        for (a, b) in rotated.vertices().zip(mesh.vertices()) {
            assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
        }
    }
}
