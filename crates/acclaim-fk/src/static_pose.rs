//! Bind pose without motion data

use std::convert::Infallible;

use acclaim_asf::Skeleton;
use log::debug;

use crate::pose::Pose;
use crate::traversal::{Joint, Visit, traverse};

/// Lay out every reachable bone along its bind direction
///
/// Starts at the root `position` (the origin when absent) and places each
/// bone at `parent end + direction · length`. No rotations or direction
/// corrections are applied; undefined and revisited bones are skipped.
pub fn static_pose(skeleton: &Skeleton) -> Pose {
    let origin = Joint::at(skeleton.root_position());

    let result = traverse(skeleton, origin, |visit, from| {
        Ok::<_, Infallible>(match visit {
            Visit::Bone(bone) => Some(Joint::at(from.position + bone.direction * bone.length)),
            Visit::Missing { parent, bone } => {
                debug!("'{parent}' lists undefined child '{bone}'; skipping");
                None
            }
            Visit::Revisited(bone) => {
                debug!("'{bone}' reached twice; skipping");
                None
            }
        })
    });

    match result {
        Ok(pose) => pose,
        Err(never) => match never {},
    }
}
