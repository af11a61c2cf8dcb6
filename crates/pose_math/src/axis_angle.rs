//! Axis-angle rotations and the quaternion conversions.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::KernelConfig;
use crate::error::PoseError;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;

/// A rotation of `angle` radians about the unit vector `axis`.
///
/// The zero rotation is represented with [`AxisAngle::CANONICAL_AXIS`] and
/// an angle of 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AxisAngle {
    pub axis: Vector3,
    pub angle: f64,
}

impl AxisAngle {
    /// Axis reported for rotations too small to have a well-defined axis.
    pub const CANONICAL_AXIS: Vector3 = Vector3::X;

    /// The zero rotation.
    pub const ZERO: Self = Self {
        axis: Self::CANONICAL_AXIS,
        angle: 0.0,
    };

    /// Build without checking that `axis` is unit length.
    #[must_use]
    pub const fn new(axis: Vector3, angle: f64) -> Self {
        Self { axis, angle }
    }

    /// Build, checking that `axis` is unit length and the values are finite.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::NonFinite`] for NaN or infinite input and
    /// [`PoseError::NonUnitAxis`] if `‖axis‖` is off by more than
    /// [`KernelConfig::unit_norm_tolerance`].
    pub fn try_new(axis: Vector3, angle: f64) -> Result<Self, PoseError> {
        Self::try_new_with(axis, angle, &KernelConfig::DEFAULT)
    }

    /// [`AxisAngle::try_new`] with explicit tolerances.
    ///
    /// # Errors
    ///
    /// See [`AxisAngle::try_new`].
    pub fn try_new_with(
        axis: Vector3,
        angle: f64,
        config: &KernelConfig,
    ) -> Result<Self, PoseError> {
        if !axis.is_finite() || !angle.is_finite() {
            return Err(PoseError::NonFinite { what: "axis-angle" });
        }
        let norm = axis.norm();
        if (norm - 1.0).abs() > config.unit_norm_tolerance {
            return Err(PoseError::NonUnitAxis { norm });
        }
        Ok(Self::new(axis, angle))
    }

    /// The same rotation with its angle wrapped into `(−π, π]`.
    #[must_use]
    pub fn wrapped(self) -> Self {
        Self::new(self.axis, wrap_angle(self.angle))
    }
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Quaternion {
    /// Decompose into an axis and an angle in `[0, 2π]`.
    ///
    /// Quaternions whose vector part is shorter than
    /// [`KernelConfig::degenerate_axis_threshold`] map to [`AxisAngle::ZERO`].
    #[must_use]
    pub fn to_axis_angle(self) -> AxisAngle {
        self.to_axis_angle_with(&KernelConfig::DEFAULT)
    }

    /// [`Quaternion::to_axis_angle`] with an explicit degenerate threshold.
    #[must_use]
    pub fn to_axis_angle_with(self, config: &KernelConfig) -> AxisAngle {
        let v = self.vector_part();
        let magnitude = v.norm();
        if magnitude < config.degenerate_axis_threshold {
            trace!(magnitude, "near-zero rotation, using canonical axis");
            return AxisAngle::ZERO;
        }
        let angle = 2.0 * self.w.clamp(-1.0, 1.0).acos();
        AxisAngle::new(v * (1.0 / (angle * 0.5).sin()), angle)
    }

    /// Build the quaternion `(axis·sin(θ/2), cos(θ/2))`, normalized.
    ///
    /// `aa.axis` is expected to be unit length; this is not checked.
    #[must_use]
    pub fn from_axis_angle(aa: AxisAngle) -> Self {
        let (s, c) = (aa.angle * 0.5).sin_cos();
        Self::new(aa.axis.x * s, aa.axis.y * s, aa.axis.z * s, c)
    }
}

/// Wrap an angle in radians into `(−π, π]`.
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
