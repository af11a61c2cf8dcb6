//! Unit quaternion algebra and Euler angle conversions.
//!
//! Every constructor and combinator renormalizes its result, so a
//! [`Quaternion`] built through this API stays on the unit sphere up to
//! rounding. `q` and `-q` describe the same rotation; use
//! [`Quaternion::same_rotation`] rather than `==` when comparing rotations.
//!
//! Normalizing a (near-)zero quaternion yields NaN components rather than an
//! error. Use [`Quaternion::try_new`] when the input is untrusted.

use std::f64::consts::FRAC_PI_2;
use std::ops::{Mul, Neg};

#[cfg(any(test, feature = "approx"))]
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::KernelConfig;
use crate::dcm::Dcm;
use crate::error::PoseError;
use crate::euler::{AngleUnit, EulerAngles, RotationOrder};
use crate::vector3::Vector3;

/// A rotation in 3D space as a unit quaternion `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    /// The zero rotation.
    pub const IDENTITY: Self = Self::from_xyzw_unchecked(0.0, 0.0, 0.0, 1.0);

    /// Build a quaternion from raw components without normalizing.
    #[must_use]
    pub const fn from_xyzw_unchecked(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Build a quaternion and normalize it.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::from_xyzw_unchecked(x, y, z, w).normalize()
    }

    /// Build a quaternion, rejecting non-finite or near-zero input.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::NonFinite`] if a component is NaN or infinite and
    /// [`PoseError::DegenerateQuaternion`] if the norm is below
    /// [`KernelConfig::min_norm`].
    pub fn try_new(x: f64, y: f64, z: f64, w: f64) -> Result<Self, PoseError> {
        Self::try_new_with(x, y, z, w, &KernelConfig::DEFAULT)
    }

    /// [`Quaternion::try_new`] with explicit tolerances.
    ///
    /// # Errors
    ///
    /// See [`Quaternion::try_new`].
    pub fn try_new_with(
        x: f64,
        y: f64,
        z: f64,
        w: f64,
        config: &KernelConfig,
    ) -> Result<Self, PoseError> {
        let raw = Self::from_xyzw_unchecked(x, y, z, w);
        if !raw.is_finite() {
            return Err(PoseError::NonFinite { what: "quaternion" });
        }
        let norm = raw.norm();
        if norm < config.min_norm {
            return Err(PoseError::DegenerateQuaternion { norm });
        }
        Ok(raw.normalize())
    }

    /// Euclidean norm of all four components.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Four-dimensional dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// The vector part `(x, y, z)`.
    #[must_use]
    pub fn vector_part(self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Divide every component by the norm.
    #[must_use]
    pub fn normalize(self) -> Self {
        let magnitude = self.norm();
        Self::from_xyzw_unchecked(
            self.x / magnitude,
            self.y / magnitude,
            self.z / magnitude,
            self.w / magnitude,
        )
    }

    /// Hamilton product `q1 ⊗ q2`, normalized.
    ///
    /// In frame-chaining terms `q1` is the initial rotation and `q2` the
    /// additional one, matching [`Hmat::composite`](crate::Hmat::composite).
    #[must_use]
    pub fn composite(q1: Self, q2: Self) -> Self {
        Self::from_xyzw_unchecked(
            q1.w * q2.x + q1.x * q2.w + q1.y * q2.z - q1.z * q2.y,
            q1.w * q2.y - q1.x * q2.z + q1.y * q2.w + q1.z * q2.x,
            q1.w * q2.z + q1.x * q2.y - q1.y * q2.x + q1.z * q2.w,
            q1.w * q2.w - q1.x * q2.x - q1.y * q2.y - q1.z * q2.z,
        )
        .normalize()
    }

    /// Conjugate, normalized.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::from_xyzw_unchecked(-self.x, -self.y, -self.z, self.w).normalize()
    }

    /// Whether `self` and `other` describe the same rotation, allowing for
    /// the sign ambiguity of the double cover.
    #[must_use]
    pub fn same_rotation(self, other: Self, tolerance: f64) -> bool {
        let same = (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
            .max((self.w - other.w).abs());
        let flipped = (self.x + other.x)
            .abs()
            .max((self.y + other.y).abs())
            .max((self.z + other.z).abs())
            .max((self.w + other.w).abs());
        same.min(flipped) <= tolerance
    }

    /// Convert Euler angles using the sequence recorded in their tag.
    #[must_use]
    pub fn from_euler(angles: EulerAngles) -> Self {
        match angles.order {
            RotationOrder::Zyx => Self::from_euler_zyx(angles),
            RotationOrder::Xyz => Self::from_euler_xyz(angles),
        }
    }

    /// Convert yaw-pitch-roll angles (`qz ⊗ qy ⊗ qx`).
    ///
    /// The order tag of `angles` is not consulted; the unit tag is.
    #[must_use]
    pub fn from_euler_zyx(angles: EulerAngles) -> Self {
        let h = HalfAngles::of(angles);
        Self::from_xyzw_unchecked(
            h.sr * h.cp * h.cy - h.cr * h.sp * h.sy,
            h.cr * h.sp * h.cy + h.sr * h.cp * h.sy,
            h.cr * h.cp * h.sy - h.sr * h.sp * h.cy,
            h.cr * h.cp * h.cy + h.sr * h.sp * h.sy,
        )
        .normalize()
    }

    /// Decompose into yaw-pitch-roll angles, in radians.
    ///
    /// Pitch is clamped to `±π/2` at gimbal lock.
    #[must_use]
    pub fn to_euler_zyx(self) -> EulerAngles {
        let q = self;
        let roll = f64::atan2(
            2.0 * (q.w * q.x + q.y * q.z),
            1.0 - 2.0 * (q.x * q.x + q.y * q.y),
        );
        let pitch = clamped_asin(2.0 * (q.w * q.y - q.z * q.x));
        let yaw = f64::atan2(
            2.0 * (q.w * q.z + q.x * q.y),
            1.0 - 2.0 * (q.y * q.y + q.z * q.z),
        );
        EulerAngles::new(roll, pitch, yaw, RotationOrder::Zyx, AngleUnit::Radians)
    }

    /// Convert roll-pitch-yaw angles (`qx ⊗ qy ⊗ qz`).
    ///
    /// The order tag of `angles` is not consulted; the unit tag is.
    #[must_use]
    pub fn from_euler_xyz(angles: EulerAngles) -> Self {
        let h = HalfAngles::of(angles);
        Self::from_xyzw_unchecked(
            h.sr * h.cp * h.cy + h.cr * h.sp * h.sy,
            h.cr * h.sp * h.cy - h.sr * h.cp * h.sy,
            h.cr * h.cp * h.sy + h.sr * h.sp * h.cy,
            h.cr * h.cp * h.cy - h.sr * h.sp * h.sy,
        )
        .normalize()
    }

    /// Decompose into roll-pitch-yaw angles, in radians.
    ///
    /// Pitch is clamped to `±π/2` at gimbal lock.
    #[must_use]
    pub fn to_euler_xyz(self) -> EulerAngles {
        let q = self;
        let roll = f64::atan2(
            2.0 * (q.w * q.x - q.y * q.z),
            1.0 - 2.0 * (q.x * q.x + q.y * q.y),
        );
        let pitch = clamped_asin(2.0 * (q.w * q.y + q.z * q.x));
        let yaw = f64::atan2(
            2.0 * (q.w * q.z - q.x * q.y),
            1.0 - 2.0 * (q.y * q.y + q.z * q.z),
        );
        EulerAngles::new(roll, pitch, yaw, RotationOrder::Xyz, AngleUnit::Radians)
    }

    /// The direction cosine matrix of this rotation, see [`Dcm`] for the
    /// storage convention.
    #[must_use]
    pub fn to_dcm(self) -> Dcm {
        Dcm::from_quaternion(self)
    }

    /// Recover the quaternion a [`Dcm`] was built from.
    #[must_use]
    pub fn from_dcm(dcm: Dcm) -> Self {
        dcm.to_quaternion()
    }

    /// Map `v` through the matrix of this quaternion.
    ///
    /// Because [`Dcm`] stores the transposed rotation matrix this equals the
    /// sandwich product `q⁻¹ · v · q`.
    #[must_use]
    pub fn transform_vector(self, v: Vector3) -> Vector3 {
        self.to_dcm().transform_vector(v)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::composite(self, rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    /// The antipodal quaternion; same rotation.
    fn neg(self) -> Self {
        Self::from_xyzw_unchecked(-self.x, -self.y, -self.z, -self.w)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    /// Component-wise comparison; `q` and `-q` are NOT equal here.
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

/// Sines and cosines of the half angles of an Euler triple.
struct HalfAngles {
    cr: f64,
    sr: f64,
    cp: f64,
    sp: f64,
    cy: f64,
    sy: f64,
}

impl HalfAngles {
    fn of(angles: EulerAngles) -> Self {
        let (roll, pitch, yaw) = angles.in_radians();
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();
        Self {
            cr,
            sr,
            cp,
            sp,
            cy,
            sy,
        }
    }
}

/// `asin` that returns `±π/2` instead of NaN once rounding pushes the
/// argument to or past ±1.
fn clamped_asin(s: f64) -> f64 {
    if s.abs() >= 1.0 {
        trace!(sin_pitch = s, "gimbal lock, clamping pitch");
        FRAC_PI_2.copysign(s)
    } else {
        s.asin()
    }
}
