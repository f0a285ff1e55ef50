//! Planar projective transform fitted from point correspondences.
//!
//! ## Algorithm
//! 1. Normalize each point set (centroid to origin, mean distance sqrt(2))
//! 2. Stack the 2n x 9 DLT system and take the eigenvector of `AᵀA` with the
//!    smallest eigenvalue (least-squares solution for n > 4)
//! 3. Reject rank-deficient systems and singular transforms
//! 4. Undo the normalization and scale so that `H[2][2] = 1`

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

use crate::error::HomographyError;
use crate::geometry::distance;
use crate::models::Point2;

/// Fewest correspondences that determine a homography.
pub const MIN_CORRESPONDENCES: usize = 4;

/// Relative eigenvalue floor below which the DLT system has no unique solution.
const RANK_TOL: f64 = 1e-12;
/// Minimum |det| of the unit-norm normalized transform.
const SINGULAR_TOL: f64 = 1e-10;
/// Homogeneous scale below which a point maps to infinity.
const W_EPS: f64 = 1e-9;
const EPS: f64 = 1e-12;

type Row9 = SVector<f64, 9>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
    matrix: Matrix3<f64>,
}

impl Homography {
    /// Fit the transform mapping `source[i]` onto `destination[i]`.
    pub fn from_correspondences(
        source: &[Point2],
        destination: &[Point2],
    ) -> Result<Self, HomographyError> {
        if source.len() != destination.len() {
            return Err(HomographyError::MismatchedCorrespondences {
                source_len: source.len(),
                destination_len: destination.len(),
            });
        }
        if source.len() < MIN_CORRESPONDENCES {
            return Err(HomographyError::InsufficientCorrespondences {
                found: source.len(),
            });
        }
        if source
            .iter()
            .chain(destination)
            .any(|p| !p.0.is_finite() || !p.1.is_finite())
        {
            return Err(HomographyError::DegenerateGeometry("non-finite coordinates"));
        }

        let t_src = normalization(source)?;
        let t_dst = normalization(destination)?;

        let mut ata = SMatrix::<f64, 9, 9>::zeros();
        for (s, d) in source.iter().zip(destination) {
            let (x, y) = apply_affine(&t_src, *s);
            let (u, v) = apply_affine(&t_dst, *d);
            let r1 = Row9::from_column_slice(&[-x, -y, -1.0, 0.0, 0.0, 0.0, u * x, u * y, u]);
            let r2 = Row9::from_column_slice(&[0.0, 0.0, 0.0, -x, -y, -1.0, v * x, v * y, v]);
            ata += r1 * r1.transpose() + r2 * r2.transpose();
        }

        let eigen = ata.symmetric_eigen();
        let mut order: Vec<usize> = (0..9).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let largest = eigen.eigenvalues[order[8]];
        let second = eigen.eigenvalues[order[1]];
        if !(largest > 0.0) || second <= RANK_TOL * largest {
            return Err(HomographyError::DegenerateGeometry(
                "correspondences do not determine a unique transform",
            ));
        }

        let h = eigen.eigenvectors.column(order[0]);
        let normalized = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], h[8]);
        if normalized.determinant().abs() <= SINGULAR_TOL {
            return Err(HomographyError::DegenerateGeometry("singular transform"));
        }

        let t_dst_inv = t_dst
            .try_inverse()
            .ok_or(HomographyError::DegenerateGeometry("singular normalization"))?;
        let mut matrix = t_dst_inv * normalized * t_src;

        let scale = if matrix[(2, 2)].abs() > EPS {
            matrix[(2, 2)]
        } else {
            matrix.norm()
        };
        matrix /= scale;

        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(HomographyError::DegenerateGeometry("non-finite transform"));
        }

        Ok(Self { matrix })
    }

    /// Wrap an existing 3x3 matrix.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Result<Self, HomographyError> {
        if matrix.iter().any(|v| !v.is_finite()) || matrix.determinant().abs() <= EPS {
            return Err(HomographyError::DegenerateGeometry("singular transform"));
        }
        Ok(Self { matrix })
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    pub fn inverse(&self) -> Option<Homography> {
        self.matrix.try_inverse().map(|matrix| Homography { matrix })
    }

    /// Map one point; fails when it lands on the line at infinity.
    pub fn transform_point(&self, p: Point2) -> Result<Point2, HomographyError> {
        let v = self.matrix * Vector3::new(p.0, p.1, 1.0);
        let w = v[2];
        if !w.is_finite() || w.abs() <= W_EPS || !v[0].is_finite() || !v[1].is_finite() {
            return Err(HomographyError::DegenerateGeometry("point maps to infinity"));
        }
        Ok((v[0] / w, v[1] / w))
    }

    pub fn transform(&self, points: &[Point2]) -> Result<Vec<Point2>, HomographyError> {
        points.iter().map(|p| self.transform_point(*p)).collect()
    }

    /// Mean distance between the mapped `source` and `destination`.
    pub fn reprojection_error(
        &self,
        source: &[Point2],
        destination: &[Point2],
    ) -> Result<f64, HomographyError> {
        if source.len() != destination.len() {
            return Err(HomographyError::MismatchedCorrespondences {
                source_len: source.len(),
                destination_len: destination.len(),
            });
        }
        if source.is_empty() {
            return Ok(0.0);
        }
        let mapped = self.transform(source)?;
        let total: f64 = mapped
            .iter()
            .zip(destination)
            .map(|(m, d)| distance(*m, *d))
            .sum();
        Ok(total / source.len() as f64)
    }
}

/// Similarity moving the centroid to the origin with mean distance sqrt(2).
fn normalization(points: &[Point2]) -> Result<Matrix3<f64>, HomographyError> {
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.1).sum::<f64>() / n;
    let mean_dist = points.iter().map(|p| distance(*p, (cx, cy))).sum::<f64>() / n;
    if mean_dist <= EPS {
        return Err(HomographyError::DegenerateGeometry("all points coincide"));
    }
    let s = std::f64::consts::SQRT_2 / mean_dist;
    Ok(Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0))
}

fn apply_affine(t: &Matrix3<f64>, p: Point2) -> Point2 {
    (
        t[(0, 0)] * p.0 + t[(0, 1)] * p.1 + t[(0, 2)],
        t[(1, 0)] * p.0 + t[(1, 1)] * p.1 + t[(1, 2)],
    )
}
