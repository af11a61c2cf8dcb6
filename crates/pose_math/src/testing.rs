//! Shared helpers for the unit tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Hmat, Quaternion, Vector3};

pub(crate) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed_cafe)
}

/// Uniformly distributed unit quaternion (Shoemake's method).
pub(crate) fn random_quaternion(rng: &mut StdRng) -> Quaternion {
    let (r1, r2, r3): (f64, f64, f64) = (rng.random(), rng.random(), rng.random());
    let (a, b) = ((1.0 - r1).sqrt(), r1.sqrt());
    let tau = std::f64::consts::TAU;
    Quaternion::new(
        a * (tau * r2).sin(),
        a * (tau * r2).cos(),
        b * (tau * r3).sin(),
        b * (tau * r3).cos(),
    )
}

pub(crate) fn random_unit_vector(rng: &mut StdRng) -> Vector3 {
    loop {
        let v = Vector3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let n = v.norm();
        if n > 0.1 && n <= 1.0 {
            return v * (1.0 / n);
        }
    }
}

pub(crate) fn random_hmat(rng: &mut StdRng) -> Hmat {
    let pos = Vector3::new(
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
        rng.random_range(-10.0..10.0),
    );
    Hmat::new(random_quaternion(rng), pos)
}

#[track_caller]
pub(crate) fn assert_same_rotation(actual: Quaternion, expected: Quaternion, tolerance: f64) {
    assert!(
        actual.same_rotation(expected, tolerance),
        "rotations differ: {actual:?} vs {expected:?}"
    );
}

#[track_caller]
pub(crate) fn assert_same_pose(actual: Hmat, expected: Hmat, tolerance: f64) {
    let dp = (actual.pos - expected.pos).norm();
    assert!(dp <= tolerance, "positions differ by {dp}: {actual:?} vs {expected:?}");
    assert_same_rotation(actual.quat, expected.quat, tolerance);
}
