//! Per-bone transforms computed once per skeleton
//!
//! A bone's local rotation for a frame is `L = Cinv · M · C · B`, where `C` is
//! the bind-pose axis rotation, `M` the rotation built from the frame's dof
//! values and `B` an extra bind correction (identity for ASF data).

use acclaim_asf::BoneDefinition;
use acclaim_data::{Channel, DMat3, DVec3};

use crate::error::{FkError, Result};

/// Determinants below this magnitude are treated as singular
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Static data for one bone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneTransform {
    /// Bind-pose axis rotation `C`
    pub axis: DMat3,
    /// Inverse axis rotation `Cinv`
    pub axis_inverse: DMat3,
    /// Extra bind correction `B`
    pub bind: DMat3,
    /// Bind direction after direction correction
    pub direction: DVec3,
}

impl BoneTransform {
    /// Build the transform for `bone`, negating the direction z component
    /// when `flip_z` is set
    pub fn for_bone(bone: &BoneDefinition, flip_z: bool) -> Result<Self> {
        let mut direction = bone.direction;
        if flip_z {
            direction.z = -direction.z;
        }

        let Some(axis) = bone.axis.as_ref() else {
            return Ok(Self {
                axis: DMat3::IDENTITY,
                axis_inverse: DMat3::IDENTITY,
                bind: DMat3::IDENTITY,
                direction,
            });
        };

        let matrix = axis.matrix();
        let axis_inverse = invert(matrix).ok_or_else(|| FkError::SingularAxis {
            bone: bone.name.clone(),
            determinant: matrix.determinant(),
        })?;

        Ok(Self {
            axis: matrix,
            axis_inverse,
            bind: DMat3::IDENTITY,
            direction,
        })
    }

    /// Local rotation for the given motion rotation `M`
    pub fn local(&self, motion: DMat3) -> DMat3 {
        self.axis_inverse * motion * self.axis * self.bind
    }
}

/// Closed-form inverse via the adjugate
///
/// Returns `None` when the determinant is not finite or its magnitude is below
/// [`SINGULAR_EPSILON`].
pub fn invert(m: DMat3) -> Option<DMat3> {
    let (a, b, c) = (m.x_axis, m.y_axis, m.z_axis);
    let bc = b.cross(c);
    let det = a.dot(bc);
    if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
        return None;
    }

    // Rows of the inverse are the cofactor vectors
    let adjugate = DMat3::from_cols(bc, c.cross(a), a.cross(b)).transpose();
    Some(adjugate.mul_scalar(det.recip()))
}

/// Compose `R(dof[0], v0) · R(dof[1], v1) · ⋯`
///
/// Values are taken by position. Missing values count as zero and dof entries
/// that are not rotation channels consume their value without rotating.
pub fn dof_rotation(dof: &[String], values: &[f64]) -> DMat3 {
    dof.iter()
        .enumerate()
        .fold(DMat3::IDENTITY, |matrix, (index, name)| {
            let axis = Channel::parse(name).and_then(Channel::rotation_axis);
            match (axis, values.get(index)) {
                (Some(axis), Some(&degrees)) => matrix * axis.rotation(degrees),
                _ => matrix,
            }
        })
}
