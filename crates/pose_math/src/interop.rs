//! Conversions to and from [`glam`]'s double-precision types.
//!
//! `Dcm → DMat3` copies entries position for position, so the result is in
//! the same transposed convention as the [`Dcm`]: it equals
//! `DMat3::from_quat(q).transpose()`, not `DMat3::from_quat(q)`.

use glam::{DMat3, DQuat, DVec3};

use crate::dcm::Dcm;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        DVec3::new(v.x, v.y, v.z)
    }
}

impl From<DQuat> for Quaternion {
    /// Renormalizes, like every other [`Quaternion`] constructor.
    fn from(q: DQuat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for DQuat {
    fn from(q: Quaternion) -> Self {
        DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<Dcm> for DMat3 {
    fn from(dcm: Dcm) -> Self {
        let e = dcm.e;
        DMat3::from_cols(
            DVec3::new(e[0][0], e[1][0], e[2][0]),
            DVec3::new(e[0][1], e[1][1], e[2][1]),
            DVec3::new(e[0][2], e[1][2], e[2][2]),
        )
    }
}

impl From<DMat3> for Dcm {
    /// Copies entries position for position; no transpose is applied.
    fn from(m: DMat3) -> Self {
        Dcm::from_rows([m.row(0).to_array(), m.row(1).to_array(), m.row(2).to_array()])
    }
}
