//! Geometry utilities shared by the unraveler and the simplifier.
//!
//! All computations are on XYZ only; radii never take part in geometry.

use nalgebra::{Matrix3, SymmetricEigen, Vector3};

use super::Point3D;
use crate::error::{MorphError, Result};

/// Magnitudes at or below this are treated as zero.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Compute the centroid of a set of points.
///
/// Returns the origin for an empty slice.
///
/// # Example
/// ```
/// use shakha::core::{Point3D, math::compute_centroid};
///
/// let points = [Point3D::new(0.0, 0.0, 0.0, 1.0), Point3D::new(2.0, 4.0, 6.0, 1.0)];
/// let c = compute_centroid(&points);
/// assert_eq!((c.x, c.y, c.z), (1.0, 2.0, 3.0));
/// ```
#[inline]
pub fn compute_centroid(points: &[Point3D]) -> Vector3<f64> {
    if points.is_empty() {
        return Vector3::zeros();
    }

    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc: Vector3<f64>, p| acc + p.xyz());
    sum / points.len() as f64
}

/// Compute the 3x3 scatter matrix of points around `centroid`.
///
/// ```text
/// | Σdx²   Σdxdy  Σdxdz |
/// | Σdxdy  Σdy²   Σdydz |
/// | Σdxdz  Σdydz  Σdz²  |
/// ```
///
/// Equivalent to `Xᵀ·X` for the centered coordinate matrix `X`; the
/// eigenvectors are the same as the covariance's.
#[inline]
pub fn compute_covariance(points: &[Point3D], centroid: Vector3<f64>) -> Matrix3<f64> {
    let mut cov = Matrix3::zeros();
    for p in points {
        let d = p.xyz() - centroid;
        cov += d * d.transpose();
    }
    cov
}

/// Eigenvector of the largest eigenvalue of a symmetric 3x3 matrix.
///
/// The sign of the returned unit vector is arbitrary.
///
/// # Errors
/// `DegenerateGeometry` when the largest eigenvalue is not positive, i.e. the
/// points have no spread.
pub fn principal_direction(cov: &Matrix3<f64>) -> Result<Vector3<f64>> {
    let eigen = SymmetricEigen::new(*cov);
    let idx = eigen.eigenvalues.imax();
    let lambda = eigen.eigenvalues[idx];

    if !lambda.is_finite() || lambda <= DEGENERATE_EPSILON {
        return Err(MorphError::DegenerateGeometry(format!(
            "largest eigenvalue {lambda:e} has no spread"
        )));
    }

    Ok(eigen.eigenvectors.column(idx).into_owned())
}

/// Principal axis of a window of points.
///
/// # Errors
/// - `InsufficientPoints` for fewer than two points
/// - `DegenerateGeometry` when all points coincide
pub fn window_direction(points: &[Point3D]) -> Result<Vector3<f64>> {
    if points.len() < 2 {
        return Err(MorphError::InsufficientPoints {
            needed: 2,
            found: points.len(),
        });
    }

    let centroid = compute_centroid(points);
    let cov = compute_covariance(points, centroid);
    principal_direction(&cov)
}

/// Perpendicular distance from `x0` to the line through `start` and `end`.
///
/// Uses `|(end - start) × (start - x0)| / |end - start|`. When `start` and
/// `end` coincide the line is undefined and the point-to-point distance to
/// `start` is returned instead.
#[inline]
pub fn point_line_distance(x0: &Vector3<f64>, start: &Vector3<f64>, end: &Vector3<f64>) -> f64 {
    let line = end - start;
    let len = line.norm();
    if len <= DEGENERATE_EPSILON {
        return (x0 - start).norm();
    }
    line.cross(&(start - x0)).norm() / len
}
