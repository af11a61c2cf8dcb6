//! Euler angle triples tagged with their rotation sequence and unit.
//!
//! The [`RotationOrder`] tag records which composition sequence produced the
//! angles. Feeding a [`RotationOrder::Zyx`] triple into the XYZ conversion
//! yields a different (wrong) rotation, so conversions that accept an
//! [`EulerAngles`] without an explicit sequence dispatch on the tag.

use serde::{Deserialize, Serialize};

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Rotation sequence of an Euler triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationOrder {
    /// Yaw-pitch-roll: `q = qz(z) ⊗ qy(y) ⊗ qx(x)`.
    Zyx,
    /// Roll-pitch-yaw: `q = qx(x) ⊗ qy(y) ⊗ qz(z)`.
    Xyz,
}

/// Scale of the stored angle values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

/// Rotations about the x, y and z axes.
///
/// `unit` always describes the scale of `x`, `y` and `z`; the unit
/// conversions rescale the values and retag them together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about x (roll).
    pub x: f64,
    /// Rotation about y (pitch).
    pub y: f64,
    /// Rotation about z (yaw).
    pub z: f64,
    pub order: RotationOrder,
    pub unit: AngleUnit,
}

impl EulerAngles {
    /// Create angles with an explicit order and unit.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, order: RotationOrder, unit: AngleUnit) -> Self {
        Self {
            x,
            y,
            z,
            order,
            unit,
        }
    }

    /// A ZYX triple in radians.
    #[must_use]
    pub const fn zyx_radians(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, RotationOrder::Zyx, AngleUnit::Radians)
    }

    /// An XYZ triple in radians.
    #[must_use]
    pub const fn xyz_radians(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, RotationOrder::Xyz, AngleUnit::Radians)
    }

    /// Convert to radians.
    ///
    /// A value already tagged [`AngleUnit::Radians`] is returned unchanged.
    #[must_use]
    pub fn to_radians(self) -> Self {
        match self.unit {
            AngleUnit::Radians => self,
            AngleUnit::Degrees => Self {
                x: self.x * DEG_TO_RAD,
                y: self.y * DEG_TO_RAD,
                z: self.z * DEG_TO_RAD,
                unit: AngleUnit::Radians,
                ..self
            },
        }
    }

    /// Convert to degrees.
    ///
    /// A value already tagged [`AngleUnit::Degrees`] is returned unchanged.
    #[must_use]
    pub fn to_degrees(self) -> Self {
        match self.unit {
            AngleUnit::Degrees => self,
            AngleUnit::Radians => Self {
                x: self.x * RAD_TO_DEG,
                y: self.y * RAD_TO_DEG,
                z: self.z * RAD_TO_DEG,
                unit: AngleUnit::Degrees,
                ..self
            },
        }
    }

    /// The `(x, y, z)` triple in radians, whatever the stored unit.
    #[must_use]
    pub fn in_radians(self) -> (f64, f64, f64) {
        let r = self.to_radians();
        (r.x, r.y, r.z)
    }
}
