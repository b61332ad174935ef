//! Triangle primitive with precomputed normal and 2D containment test.

use nalgebra::Rotation3;
use pinbed_math::{Plane, Point3, Vec2, Vec3, LINEAR_EPS};

use crate::error::{MeshError, Result};

/// Slack for the barycentric containment test, so grid points that land
/// exactly on a shared edge or vertex are claimed by a triangle instead of
/// falling through as undetermined.
const CONTAIN_EPS: f64 = 1e-8;

/// A triangle with counter-clockwise vertex winding and a unit normal
/// computed once at construction.
///
/// Immutable: [`translated`](Triangle::translated) and
/// [`rotated_z`](Triangle::rotated_z) return new triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3; 3],
    normal: Vec3,
}

impl Triangle {
    /// Create a triangle from three vertices in counter-clockwise winding.
    ///
    /// The normal is `normalize((v2 - v1) × (v3 - v1))`. A zero-area
    /// triangle fails with [`MeshError::DegenerateTriangle`] instead of
    /// carrying a NaN normal.
    pub fn new(v1: Point3, v2: Point3, v3: Point3) -> Result<Self> {
        let normal = (v2 - v1)
            .cross(&(v3 - v1))
            .try_normalize(LINEAR_EPS)
            .ok_or(MeshError::DegenerateTriangle)?;
        Ok(Self {
            vertices: [v1, v2, v3],
            normal,
        })
    }

    /// The three corner vertices.
    pub fn vertices(&self) -> &[Point3; 3] {
        &self.vertices
    }

    /// Unit normal, outward for counter-clockwise winding.
    pub fn normal(&self) -> &Vec3 {
        &self.normal
    }

    /// The plane this triangle spans.
    pub fn plane(&self) -> Plane {
        Plane {
            normal: self.normal,
            d: -self.normal.dot(&self.vertices[0].coords),
        }
    }

    /// Barycentric weights of `(x, y)` with respect to this triangle's 2D
    /// footprint, or `None` if the point lies outside it.
    ///
    /// The query z is ignored: this is a point-in-triangle test in the xy
    /// plane. The returned weights `[w0, w1, w2]` follow vertex order, are
    /// each `>= 0` (within tolerance), and sum to 1. A triangle standing
    /// edge-on to the xy plane has no footprint and reports `None`.
    pub fn barycentric_at(&self, x: f64, y: f64) -> Option<[f64; 3]> {
        let a = &self.vertices[0];
        let e1 = Vec2::new(self.vertices[1].x - a.x, self.vertices[1].y - a.y);
        let e2 = Vec2::new(self.vertices[2].x - a.x, self.vertices[2].y - a.y);
        let q = Vec2::new(x - a.x, y - a.y);

        let d00 = e1.dot(&e1);
        let d01 = e1.dot(&e2);
        let d11 = e2.dot(&e2);
        let d02 = e1.dot(&q);
        let d12 = e2.dot(&q);

        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < LINEAR_EPS {
            return None;
        }

        let u = (d11 * d02 - d01 * d12) / denom;
        let v = (d00 * d12 - d01 * d02) / denom;

        if u >= -CONTAIN_EPS && v >= -CONTAIN_EPS && u + v <= 1.0 + CONTAIN_EPS {
            Some([1.0 - u - v, u, v])
        } else {
            None
        }
    }

    /// Surface height at `(x, y)`: the barycentric-weighted average of the
    /// vertex z values, or `None` outside the footprint.
    pub fn height_at(&self, x: f64, y: f64) -> Option<f64> {
        let w = self.barycentric_at(x, y)?;
        Some(
            self.vertices[0].z * w[0] + self.vertices[1].z * w[1] + self.vertices[2].z * w[2],
        )
    }

    /// A copy translated by `delta`. The normal is translation-invariant.
    pub fn translated(&self, delta: &Vec3) -> Triangle {
        Triangle {
            vertices: [
                self.vertices[0] + delta,
                self.vertices[1] + delta,
                self.vertices[2] + delta,
            ],
            normal: self.normal,
        }
    }

    /// A copy rotated by `angle` radians about the z axis. Vertex z values
    /// are unchanged; the normal rotates with the vertices.
    pub fn rotated_z(&self, angle: f64) -> Triangle {
        let rot = Rotation3::from_axis_angle(&Vec3::z_axis(), angle);
        Triangle {
            vertices: [
                rot * self.vertices[0],
                rot * self.vertices[1],
                rot * self.vertices[2],
            ],
            normal: rot * self.normal,
        }
    }
}
