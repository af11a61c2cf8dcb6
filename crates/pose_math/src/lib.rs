//! # pose_math
//!
//! Rotation and rigid-pose math kernel. Value types for 3D orientation and
//! position, with the conversion network between quaternions, direction
//! cosine matrices, Euler angles and axis-angle, plus pose composition,
//! inversion, relative pose and averaging.
//!
//! This crate provides:
//!
//! - [`Vector3`] — free vectors.
//! - [`EulerAngles`] — angle triples tagged with [`RotationOrder`] and
//!   [`AngleUnit`].
//! - [`Quaternion`] — unit quaternions; the hub of all conversions.
//! - [`AxisAngle`] — single-axis rotations.
//! - [`Dcm`] — direction cosine matrices, stored TRANSPOSED (see [`dcm`]).
//! - [`Hmat`] — rigid poses with chaining, inversion and averaging.
//! - [`KernelConfig`] and [`PoseError`] — tolerances and the errors of the
//!   checked `try_*` constructors.
//!
//! Every type is a `Copy` value and every operation is a pure function, so
//! everything here is `Send + Sync` and may be called from any thread.
//!
//! glam's double-precision types convert to and from these types via
//! `From` (see [`interop`]).

pub mod axis_angle;
pub mod config;
pub mod dcm;
pub mod error;
pub mod euler;
pub mod hmat;
pub mod interop;
pub mod quaternion;
pub mod vector3;

#[cfg(test)]
mod testing;

// Re-export glam types for convenience.
pub use glam::{DMat3, DQuat, DVec3};

pub use axis_angle::{AxisAngle, wrap_angle};
pub use config::KernelConfig;
pub use dcm::Dcm;
pub use error::PoseError;
pub use euler::{AngleUnit, EulerAngles, RotationOrder};
pub use hmat::Hmat;
pub use quaternion::Quaternion;
pub use vector3::Vector3;
