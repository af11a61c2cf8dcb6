//! Numerical tolerances.

use serde::{Deserialize, Serialize};

/// Tolerances used by the guarded conversions and the checked constructors.
///
/// Unknown fields are rejected and missing fields fall back to
/// [`KernelConfig::DEFAULT`], so a partial JSON document is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KernelConfig {
    /// Below this vector-part magnitude a quaternion is treated as the zero
    /// rotation when converting to axis-angle.
    pub degenerate_axis_threshold: f64,
    /// Allowed deviation of `‖q‖` or `‖axis‖` from 1.
    pub unit_norm_tolerance: f64,
    /// Allowed deviation of `Mᵀ·M` from the identity, per element.
    pub orthonormal_tolerance: f64,
    /// Smallest norm a quaternion may have before normalizing it.
    pub min_norm: f64,
}

impl KernelConfig {
    /// The default tolerances.
    pub const DEFAULT: Self = Self {
        degenerate_axis_threshold: 1e-5,
        unit_norm_tolerance: 1e-6,
        orthonormal_tolerance: 1e-6,
        min_norm: 1e-12,
    };

    /// Create a config with the default tolerances.
    #[must_use]
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Override the axis-angle degenerate threshold.
    #[must_use]
    pub fn with_degenerate_axis_threshold(mut self, threshold: f64) -> Self {
        self.degenerate_axis_threshold = threshold;
        self
    }

    /// Override the unit-norm tolerance.
    #[must_use]
    pub fn with_unit_norm_tolerance(mut self, tolerance: f64) -> Self {
        self.unit_norm_tolerance = tolerance;
        self
    }

    /// Override the orthonormality tolerance.
    #[must_use]
    pub fn with_orthonormal_tolerance(mut self, tolerance: f64) -> Self {
        self.orthonormal_tolerance = tolerance;
        self
    }

    /// Override the minimum normalizable norm.
    #[must_use]
    pub fn with_min_norm(mut self, min_norm: f64) -> Self {
        self.min_norm = min_norm;
        self
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
