#![warn(missing_docs)]

//! Math types for the pinbed pipeline.
//!
//! Thin wrappers around nalgebra providing the vector algebra and plane
//! representation used by the mesh and depth-map stages: points, vectors,
//! guarded normalization, and plane fitting.

use nalgebra::Matrix3;
use thiserror::Error;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// A vector in 2D space.
pub type Vec2 = nalgebra::Vector2<f64>;

/// Linear tolerance for geometric comparisons (mm).
pub const LINEAR_EPS: f64 = 1e-9;

/// Errors from vector and plane operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Attempted to normalize a zero-length vector.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// Plane construction or evaluation is ill-defined.
    #[error("degenerate plane: {0}")]
    DegeneratePlane(&'static str),

    /// Too few points to fit a plane.
    #[error("best-fit plane requires at least 3 points, got {0}")]
    TooFewPoints(usize),
}

/// Result type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;

/// Normalize a vector, failing on zero length instead of producing NaN.
pub fn normalized(v: &Vec3) -> Result<Vec3> {
    v.try_normalize(LINEAR_EPS).ok_or(MathError::DegenerateVector)
}

/// Angle between two vectors in radians, in `[0, pi]`.
///
/// Fails if either operand has zero length.
pub fn angle_between(a: &Vec3, b: &Vec3) -> Result<f64> {
    let na = a.norm();
    let nb = b.norm();
    if na < LINEAR_EPS || nb < LINEAR_EPS {
        return Err(MathError::DegenerateVector);
    }
    Ok((a.dot(b) / (na * nb)).clamp(-1.0, 1.0).acos())
}

/// A plane in Hessian normal form: `normal · p + d = 0` for points `p` on
/// the plane, with `normal` of unit length.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector.
    pub normal: Vec3,
    /// Signed offset from the origin.
    pub d: f64,
}

impl Plane {
    /// Build a plane through three points.
    ///
    /// The normal follows the right-hand rule over `(p1→p2) × (p1→p3)`.
    /// Collinear points fail with [`MathError::DegeneratePlane`].
    pub fn from_points(p1: &Point3, p2: &Point3, p3: &Point3) -> Result<Self> {
        let normal = (p2 - p1)
            .cross(&(p3 - p1))
            .try_normalize(LINEAR_EPS)
            .ok_or(MathError::DegeneratePlane("collinear points"))?;
        let d = -normal.dot(&p1.coords);
        Ok(Self { normal, d })
    }

    /// Total least-squares plane fit: minimizes orthogonal distance to the
    /// point set, not z-residual.
    ///
    /// The normal is the eigenvector of the centered covariance matrix with
    /// the smallest eigenvalue. Requires at least three non-collinear points.
    pub fn best_fit(points: &[Point3]) -> Result<Self> {
        if points.len() < 3 {
            return Err(MathError::TooFewPoints(points.len()));
        }

        let n = points.len() as f64;
        let centroid: Vec3 = points.iter().map(|p| p.coords).sum::<Vec3>() / n;

        let mut cov = Matrix3::zeros();
        for p in points {
            let c = p.coords - centroid;
            cov += c * c.transpose();
        }

        let eig = cov.symmetric_eigen();
        let min_idx = eig.eigenvalues.imin();

        // A rank-deficient covariance (all points on a line or coincident)
        // leaves the normal direction unconstrained.
        let mut sorted = [eig.eigenvalues[0], eig.eigenvalues[1], eig.eigenvalues[2]];
        sorted.sort_by(|a, b| a.total_cmp(b));
        if sorted[1] < LINEAR_EPS {
            return Err(MathError::DegeneratePlane("points do not span a plane"));
        }

        let normal = normalized(&eig.eigenvectors.column(min_idx).into_owned())?;
        let d = -normal.dot(&centroid);
        Ok(Self { normal, d })
    }

    /// Height of the plane at `(x, y)`.
    ///
    /// Fails with [`MathError::DegeneratePlane`] for a vertical plane, where
    /// no single z exists per `(x, y)`.
    pub fn z_at(&self, x: f64, y: f64) -> Result<f64> {
        if self.normal.z.abs() < LINEAR_EPS {
            return Err(MathError::DegeneratePlane("vertical plane has no z at (x, y)"));
        }
        Ok((-self.d - self.normal.x * x - self.normal.y * y) / self.normal.z)
    }

    /// Signed distance from a point to the plane (positive on the normal side).
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) + self.d
    }
}
