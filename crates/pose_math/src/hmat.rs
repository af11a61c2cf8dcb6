//! Rigid poses (homogeneous transforms).
//!
//! An [`Hmat`] named `h_a2b` maps coordinates in frame `a` to frame `b`:
//! `p_b = h_a2b.transform_point(p_a)`. Composition chains left to right, so
//! `Hmat::composite(h_a2b, h_b2c)` is `h_a2c`.

use std::ops::Mul;

#[cfg(any(test, feature = "approx"))]
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::axis_angle::{AxisAngle, wrap_angle};
use crate::config::KernelConfig;
use crate::error::PoseError;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;

/// A rigid pose: translation plus unit-quaternion rotation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hmat {
    /// Translation, expressed in the target frame.
    pub pos: Vector3,
    /// Rotation as a unit quaternion.
    pub quat: Quaternion,
}

impl Hmat {
    /// The identity pose: no translation, no rotation.
    pub const IDENTITY: Self = Self {
        pos: Vector3::ZERO,
        quat: Quaternion::IDENTITY,
    };

    /// Build a pose without validating `quat`.
    #[must_use]
    pub const fn new(quat: Quaternion, pos: Vector3) -> Self {
        Self { pos, quat }
    }

    /// Build a pose, checking that `quat` is unit length and `pos` finite.
    ///
    /// # Errors
    ///
    /// Returns [`PoseError::NonFinite`] for NaN or infinite input and
    /// [`PoseError::NonUnitQuaternion`] if `‖quat‖` is off by more than
    /// [`KernelConfig::unit_norm_tolerance`].
    pub fn try_new(quat: Quaternion, pos: Vector3) -> Result<Self, PoseError> {
        Self::try_new_with(quat, pos, &KernelConfig::DEFAULT)
    }

    /// [`Hmat::try_new`] with explicit tolerances.
    ///
    /// # Errors
    ///
    /// See [`Hmat::try_new`].
    pub fn try_new_with(
        quat: Quaternion,
        pos: Vector3,
        config: &KernelConfig,
    ) -> Result<Self, PoseError> {
        if !pos.is_finite() {
            return Err(PoseError::NonFinite { what: "position" });
        }
        if !quat.is_finite() {
            return Err(PoseError::NonFinite { what: "quaternion" });
        }
        let norm = quat.norm();
        if (norm - 1.0).abs() > config.unit_norm_tolerance {
            return Err(PoseError::NonUnitQuaternion { norm });
        }
        Ok(Self::new(quat, pos))
    }

    /// A pure translation.
    #[must_use]
    pub const fn from_translation(pos: Vector3) -> Self {
        Self::new(Quaternion::IDENTITY, pos)
    }

    /// A pure rotation.
    #[must_use]
    pub const fn from_rotation(quat: Quaternion) -> Self {
        Self::new(quat, Vector3::ZERO)
    }

    /// Map a point through this pose.
    #[must_use]
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        self.quat.transform_vector(p) + self.pos
    }

    /// The pose that undoes `self`.
    #[must_use]
    pub fn inverse(self) -> Self {
        let quat = self.quat.inverse();
        Self::new(quat, -quat.transform_vector(self.pos))
    }

    /// Chain `h_a2b` and `h_b2c` into `h_a2c`.
    #[must_use]
    pub fn composite(h_a2b: Self, h_b2c: Self) -> Self {
        Self::new(
            Quaternion::composite(h_a2b.quat, h_b2c.quat),
            h_b2c.quat.transform_vector(h_a2b.pos) + h_b2c.pos,
        )
    }

    /// Pose of `c` relative to `a`, both given relative to a common frame `i`.
    #[must_use]
    pub fn relative(h_i2c: Self, h_i2a: Self) -> Self {
        Self::composite(h_i2a.inverse(), h_i2c)
    }

    /// Midpoint pose between `h_i2a` and `h_i2b`, expressed relative to `i`.
    ///
    /// The relative rotation `a → b` is taken as axis-angle, its angle
    /// wrapped into `(−π, π]` and halved, so the midpoint always lies on the
    /// short arc. A relative half turn (exactly π) halves to `+π/2` about
    /// the reported axis.
    #[must_use]
    pub fn average(h_i2b: Self, h_i2a: Self) -> Self {
        if h_i2b == h_i2a {
            trace!("averaging identical poses");
            return h_i2a;
        }
        let h_a2b = Self::relative(h_i2b, h_i2a);
        let AxisAngle { axis, angle } = h_a2b.quat.to_axis_angle();
        let half_angle = 0.5 * wrap_angle(angle);
        let h_a2c = Self::new(
            Quaternion::from_axis_angle(AxisAngle::new(axis, half_angle)),
            h_a2b.pos * 0.5,
        );
        Self::composite(h_i2a, h_a2c)
    }
}

impl Default for Hmat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Hmat {
    type Output = Self;

    /// `h_a2b * h_b2c == h_a2c`.
    fn mul(self, rhs: Self) -> Self {
        Self::composite(self, rhs)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for Hmat {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.pos.abs_diff_eq(&other.pos, epsilon) && self.quat.abs_diff_eq(&other.quat, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::euler::{AngleUnit, EulerAngles, RotationOrder};
    use crate::testing::{assert_same_pose, random_hmat, seeded_rng};

    fn yaw_degrees(deg: f64) -> Quaternion {
        Quaternion::from_euler_zyx(EulerAngles::new(
            0.0,
            0.0,
            deg,
            RotationOrder::Zyx,
            AngleUnit::Degrees,
        ))
    }

    #[test]
    fn test_identity_pose() {
        let h = Hmat::IDENTITY;
        assert_eq!(h.pos, Vector3::ZERO);
        assert_eq!(h.quat, Quaternion::IDENTITY);
        assert_eq!(Hmat::default(), h);
    }

    #[test]
    fn test_from_translation() {
        let h = Hmat::from_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(h.transform_point(Vector3::ZERO), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(h.quat, Quaternion::IDENTITY);
    }

    #[test]
    fn test_inverse_twice_is_identity_map() {
        let mut rng = seeded_rng();
        for _ in 0..200 {
            let h = random_hmat(&mut rng);
            assert_same_pose(h.inverse().inverse(), h, 1e-9);
        }
    }

    #[test]
    fn test_composite_with_inverse_is_identity() {
        let mut rng = seeded_rng();
        for _ in 0..200 {
            let h = random_hmat(&mut rng);
            assert_same_pose(h.inverse() * h, Hmat::IDENTITY, 1e-9);
            assert_same_pose(h * h.inverse(), Hmat::IDENTITY, 1e-9);
        }
    }

    #[test]
    fn test_composite_is_associative() {
        let mut rng = seeded_rng();
        for _ in 0..200 {
            let (a, b, c) = (random_hmat(&mut rng), random_hmat(&mut rng), random_hmat(&mut rng));
            assert_same_pose((a * b) * c, a * (b * c), 1e-9);
        }
    }

    #[test]
    fn test_composite_applies_first_operand_first() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let (h_a2b, h_b2c) = (random_hmat(&mut rng), random_hmat(&mut rng));
            let p = Vector3::new(0.3, -1.2, 2.5);
            let chained = h_b2c.transform_point(h_a2b.transform_point(p));
            assert_abs_diff_eq!((h_a2b * h_b2c).transform_point(p), chained, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_composite_operand_order_matters() {
        let h_a2b = Hmat::new(yaw_degrees(90.0), Vector3::new(1.0, 0.0, 0.0));
        let h_b2c = Hmat::from_translation(Vector3::new(0.0, 2.0, 0.0));
        let h_a2c = Hmat::composite(h_a2b, h_b2c);
        assert_abs_diff_eq!(h_a2c.pos, Vector3::new(1.0, 2.0, 0.0), epsilon = 1e-12);

        let swapped = Hmat::composite(h_b2c, h_a2b);
        // (0, 2, 0) seen through the yaw lands on +x.
        assert_abs_diff_eq!(swapped.pos, Vector3::new(3.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_relative_then_composite_recovers_target() {
        let mut rng = seeded_rng();
        for _ in 0..200 {
            let (h_i2a, h_i2c) = (random_hmat(&mut rng), random_hmat(&mut rng));
            let h_a2c = Hmat::relative(h_i2c, h_i2a);
            assert_same_pose(Hmat::composite(h_i2a, h_a2c), h_i2c, 1e-9);
        }
    }

    #[test]
    fn test_average_with_itself_is_exact() {
        let mut rng = seeded_rng();
        let h = random_hmat(&mut rng);
        assert_eq!(Hmat::average(h, h), h);
    }

    #[test]
    fn test_average_translation_midpoint() {
        let q = yaw_degrees(30.0);
        let h_i2a = Hmat::new(q, Vector3::new(0.0, 0.0, 0.0));
        let h_i2b = Hmat::new(q, Vector3::new(2.0, -4.0, 6.0));
        let h_i2c = Hmat::average(h_i2b, h_i2a);
        assert_abs_diff_eq!(h_i2c.pos, Vector3::new(1.0, -2.0, 3.0), epsilon = 1e-12);
        assert!(h_i2c.quat.same_rotation(q, 1e-12));
    }

    #[test]
    fn test_average_rotation_midpoint() {
        let h_i2a = Hmat::from_rotation(yaw_degrees(10.0));
        let h_i2b = Hmat::from_rotation(yaw_degrees(50.0));
        let h_i2c = Hmat::average(h_i2b, h_i2a);
        assert!(h_i2c.quat.same_rotation(yaw_degrees(30.0), 1e-12));
        assert_abs_diff_eq!(h_i2c.pos, Vector3::ZERO, epsilon = 1e-12);
    }

    #[test]
    fn test_average_straddling_half_turn_takes_short_arc() {
        let h_i2a = Hmat::from_rotation(yaw_degrees(170.0));
        let h_i2b = Hmat::from_rotation(yaw_degrees(-170.0));
        let yaw = Hmat::average(h_i2b, h_i2a).quat.to_euler_zyx().z;
        assert_abs_diff_eq!(yaw.abs(), PI, epsilon = 1e-9);

        // Symmetric in its arguments.
        let yaw = Hmat::average(h_i2a, h_i2b).quat.to_euler_zyx().z;
        assert_abs_diff_eq!(yaw.abs(), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_average_exact_half_turn_is_deterministic() {
        let h_i2a = Hmat::IDENTITY;
        let h_i2b = Hmat::from_rotation(Quaternion::from_xyzw_unchecked(0.0, 0.0, 1.0, 0.0));
        let h_i2c = Hmat::average(h_i2b, h_i2a);
        assert!(h_i2c.quat.is_finite() && h_i2c.pos.is_finite());
        let expected = Quaternion::from_xyzw_unchecked(0.0, 0.0, FRAC_PI_4.sin(), FRAC_PI_4.cos());
        assert_abs_diff_eq!(h_i2c.quat, expected, epsilon = 1e-12);
        assert_eq!(Hmat::average(h_i2b, h_i2a), h_i2c);
    }

    #[test]
    fn test_average_is_halfway_in_both_directions() {
        let mut rng = seeded_rng();
        for _ in 0..100 {
            let (h_i2a, h_i2b) = (random_hmat(&mut rng), random_hmat(&mut rng));
            let h_i2c = Hmat::average(h_i2b, h_i2a);
            let to_mid = Hmat::relative(h_i2c, h_i2a).quat.to_axis_angle().wrapped();
            let to_end = Hmat::relative(h_i2b, h_i2c).quat.to_axis_angle().wrapped();
            assert_abs_diff_eq!(to_mid.angle.abs(), to_end.angle.abs(), epsilon = 1e-6);
            assert!(to_mid.angle.abs() <= FRAC_PI_2 + 1e-9);
        }
    }

    #[test]
    fn test_try_new() {
        assert!(Hmat::try_new(Quaternion::IDENTITY, Vector3::X).is_ok());
        assert_eq!(
            Hmat::try_new(Quaternion::IDENTITY, Vector3::new(f64::NAN, 0.0, 0.0)),
            Err(PoseError::NonFinite { what: "position" })
        );
    }

    #[test]
    fn test_try_new_reports_non_unit_quaternion() {
        let doubled = Quaternion::from_xyzw_unchecked(0.0, 0.0, 0.0, 2.0);
        let err = Hmat::try_new(doubled, Vector3::X).unwrap_err();
        assert_eq!(err, PoseError::NonUnitQuaternion { norm: 2.0 });
        assert_eq!(err.to_string(), "quaternion norm 2 is not 1");
    }

    #[test]
    fn test_try_new_with_loose_tolerance() {
        let nearly = Quaternion::from_xyzw_unchecked(0.0, 0.0, 0.0, 1.001);
        assert!(matches!(
            Hmat::try_new(nearly, Vector3::X),
            Err(PoseError::NonUnitQuaternion { .. })
        ));
        let loose = KernelConfig::new().with_unit_norm_tolerance(1e-2);
        assert!(Hmat::try_new_with(nearly, Vector3::X, &loose).is_ok());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let h = Hmat::new(Quaternion::new(0.1, 0.2, 0.3, 0.9), Vector3::new(1.0, 2.0, 3.0));
        let bytes = rmp_serde::to_vec(&h).unwrap();
        let restored: Hmat = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(h, restored);
    }
}
