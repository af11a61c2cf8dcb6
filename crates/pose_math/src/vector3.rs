//! Free vectors in ℝ³.

use std::ops::{Add, Mul, Neg, Sub};

#[cfg(any(test, feature = "approx"))]
use approx::AbsDiffEq;
use serde::{Deserialize, Serialize};

/// A 3D vector of `f64` components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit x-axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit y-axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit z-axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Create a vector from its components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Scale a vector by `scalar`.
    #[must_use]
    pub fn multiply(scalar: f64, v: Self) -> Self {
        Self::new(v.x * scalar, v.y * scalar, v.z * scalar)
    }

    /// Component-wise sum of two vectors.
    #[must_use]
    pub fn add(v1: Self, v2: Self) -> Self {
        Self::new(v1.x + v2.x, v1.y + v2.y, v1.z + v2.z)
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length.
    #[must_use]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Whether every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::multiply(-1.0, self)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::multiply(rhs, self)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::multiply(self, rhs)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq for Vector3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_scales_every_component() {
        let v = Vector3::multiply(2.0, Vector3::new(1.0, -2.0, 0.5));
        assert_eq!(v, Vector3::new(2.0, -4.0, 1.0));
    }

    #[test]
    fn test_add() {
        let v = Vector3::add(Vector3::new(1.0, 2.0, 3.0), Vector3::new(-1.0, 0.5, 4.0));
        assert_eq!(v, Vector3::new(0.0, 2.5, 7.0));
    }

    #[test]
    fn test_operators_match_named_functions() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -5.0, 6.0);
        assert_eq!(a + b, Vector3::add(a, b));
        assert_eq!(a * 3.0, Vector3::multiply(3.0, a));
        assert_eq!(3.0 * a, a * 3.0);
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a - a, Vector3::ZERO);
    }

    #[test]
    fn test_norm() {
        assert_eq!(Vector3::new(3.0, 4.0, 12.0).norm(), 13.0);
        assert_eq!(Vector3::X.dot(Vector3::Y), 0.0);
    }
}
