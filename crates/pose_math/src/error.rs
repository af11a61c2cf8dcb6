//! Errors returned by the checked constructors.
//!
//! The conversion and composition functions never fail: degenerate input
//! propagates as NaN/Inf. These errors only come out of the `try_*`
//! constructors, which validate their input against a [`KernelConfig`].
//!
//! [`KernelConfig`]: crate::KernelConfig

/// Validation failures for rotation and pose values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoseError {
    /// The quaternion is too close to zero to be normalized.
    #[error("quaternion norm {norm} is too small to normalize")]
    DegenerateQuaternion { norm: f64 },

    /// A component was NaN or infinite.
    #[error("non-finite {what}")]
    NonFinite { what: &'static str },

    /// The matrix rows are not mutually orthonormal.
    #[error("matrix is not orthonormal (deviation {deviation})")]
    NotOrthonormal { deviation: f64 },

    /// The quaternion is not unit length.
    #[error("quaternion norm {norm} is not 1")]
    NonUnitQuaternion { norm: f64 },

    /// The rotation axis is not unit length.
    #[error("rotation axis norm {norm} is not 1")]
    NonUnitAxis { norm: f64 },
}
