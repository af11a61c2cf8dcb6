//! Direction cosine matrices.
//!
//! # Storage convention
//!
//! A [`Dcm`] built from quaternion `q` stores the TRANSPOSE of the usual
//! rotation matrix `R(q)`:
//!
//! ```text
//! row 0 = [1 - 2(yy + zz),  2(xy + wz),      2(xz - wy)    ]
//! row 1 = [2(xy - wz),      1 - 2(xx + zz),  2(yz + wx)    ]
//! row 2 = [2(xz + wy),      2(yz - wx),      1 - 2(xx + yy)]
//! ```
//!
//! [`Dcm::transform_vector`] multiplies by the stored matrix, so it applies
//! `R(q)ᵀ`. Matrices built elsewhere in the standard convention must be
//! transposed before use.

#[cfg(any(test, feature = "approx"))]
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::KernelConfig;
use crate::error::PoseError;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;

/// A 3×3 rotation matrix, row-major, in the transposed convention described
/// in the [module docs](self).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Dcm {
    pub e: [[f64; 3]; 3],
}

impl Dcm {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Wrap raw rows without validation.
    #[must_use]
    pub const fn from_rows(e: [[f64; 3]; 3]) -> Self {
        Self { e }
    }

    /// Wrap raw rows, checking that they form an orthonormal matrix.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::NonFinite`] for NaN or infinite entries and
    /// [`PoseError::NotOrthonormal`] when [`Dcm::orthonormality_error`]
    /// exceeds [`KernelConfig::orthonormal_tolerance`].
    pub fn try_from_rows(e: [[f64; 3]; 3]) -> Result<Self, PoseError> {
        Self::try_from_rows_with(e, &KernelConfig::DEFAULT)
    }

    /// [`Dcm::try_from_rows`] with explicit tolerances.
    ///
    /// # Errors
    ///
    /// See [`Dcm::try_from_rows`].
    pub fn try_from_rows_with(
        e: [[f64; 3]; 3],
        config: &KernelConfig,
    ) -> Result<Self, PoseError> {
        let dcm = Self::from_rows(e);
        if !e.iter().flatten().all(|v| v.is_finite()) {
            return Err(PoseError::NonFinite { what: "matrix" });
        }
        let deviation = dcm.orthonormality_error();
        if deviation > config.orthonormal_tolerance {
            return Err(PoseError::NotOrthonormal { deviation });
        }
        Ok(dcm)
    }

    /// The stored rows.
    #[must_use]
    pub const fn rows(&self) -> [[f64; 3]; 3] {
        self.e
    }

    /// Swap rows and columns.
    #[must_use]
    pub fn transpose(self) -> Self {
        let e = self.e;
        Self::from_rows([
            [e[0][0], e[1][0], e[2][0]],
            [e[0][1], e[1][1], e[2][1]],
            [e[0][2], e[1][2], e[2][2]],
        ])
    }

    /// Determinant; +1 for a proper rotation.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let e = &self.e;
        e[0][0] * (e[1][1] * e[2][2] - e[1][2] * e[2][1])
            - e[0][1] * (e[1][0] * e[2][2] - e[1][2] * e[2][0])
            + e[0][2] * (e[1][0] * e[2][1] - e[1][1] * e[2][0])
    }

    /// Largest absolute entry of `Mᵀ·M − I`, plus the deviation of the
    /// determinant from +1 to catch reflections.
    #[must_use]
    pub fn orthonormality_error(&self) -> f64 {
        let e = &self.e;
        let mut worst: f64 = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                let dot: f64 = (0..3).map(|k| e[k][i] * e[k][j]).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                worst = worst.max((dot - expected).abs());
            }
        }
        worst.max((self.determinant() - 1.0).abs())
    }

    /// Build the stored-convention matrix of `q`.
    #[must_use]
    pub fn from_quaternion(q: Quaternion) -> Self {
        let xx = q.x * q.x;
        let yy = q.y * q.y;
        let zz = q.z * q.z;
        let xy = q.x * q.y;
        let xz = q.x * q.z;
        let yz = q.y * q.z;
        let wx = q.w * q.x;
        let wy = q.w * q.y;
        let wz = q.w * q.z;

        Self::from_rows([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy)],
            [2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx)],
            [2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    /// Recover the quaternion of this matrix.
    ///
    /// All four squared components are computed from the diagonal and the
    /// largest one is used as the square-root pivot, so the off-diagonal
    /// terms are never divided by a small number. Ties resolve in the order
    /// `w`, `x`, `y`, `z`. The matrix is assumed orthonormal.
    #[must_use]
    pub fn to_quaternion(&self) -> Quaternion {
        let e = &self.e;
        let w_sq = 0.25 * (1.0 + e[0][0] + e[1][1] + e[2][2]);
        let x_sq = 0.25 * (1.0 + e[0][0] - e[1][1] - e[2][2]);
        let y_sq = 0.25 * (1.0 - e[0][0] + e[1][1] - e[2][2]);
        let z_sq = 0.25 * (1.0 - e[0][0] - e[1][1] + e[2][2]);

        let q = if w_sq >= x_sq && w_sq >= y_sq && w_sq >= z_sq {
            let w = w_sq.sqrt();
            let d = 4.0 * w;
            Quaternion::from_xyzw_unchecked(
                (e[1][2] - e[2][1]) / d,
                (e[2][0] - e[0][2]) / d,
                (e[0][1] - e[1][0]) / d,
                w,
            )
        } else if x_sq >= y_sq && x_sq >= z_sq {
            let x = x_sq.sqrt();
            let d = 4.0 * x;
            Quaternion::from_xyzw_unchecked(
                x,
                (e[0][1] + e[1][0]) / d,
                (e[2][0] + e[0][2]) / d,
                (e[1][2] - e[2][1]) / d,
            )
        } else if y_sq >= z_sq {
            let y = y_sq.sqrt();
            let d = 4.0 * y;
            Quaternion::from_xyzw_unchecked(
                (e[0][1] + e[1][0]) / d,
                y,
                (e[1][2] + e[2][1]) / d,
                (e[2][0] - e[0][2]) / d,
            )
        } else {
            if z_sq.is_nan() {
                trace!("non-finite matrix entries, quaternion will be NaN");
            }
            let z = z_sq.sqrt();
            let d = 4.0 * z;
            Quaternion::from_xyzw_unchecked(
                (e[2][0] + e[0][2]) / d,
                (e[1][2] + e[2][1]) / d,
                z,
                (e[0][1] - e[1][0]) / d,
            )
        };
        q.normalize()
    }

    /// Multiply `v` by the stored matrix.
    #[must_use]
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let e = &self.e;
        Vector3::new(
            e[0][0] * v.x + e[0][1] * v.y + e[0][2] * v.z,
            e[1][0] * v.x + e[1][1] * v.y + e[1][2] * v.z,
            e[2][0] * v.x + e[2][1] * v.y + e[2][2] * v.z,
        )
    }
}

impl Default for Dcm {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Quaternion> for Dcm {
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(q)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for Dcm {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.e
            .iter()
            .flatten()
            .zip(other.e.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}
