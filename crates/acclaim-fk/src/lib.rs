//! Forward kinematics for Acclaim skeletons
//!
//! Turns an ASF [`Skeleton`](acclaim_asf::Skeleton) and AMC frame channels into
//! world-space bone segments.
//!
//! For every bone the engine precomputes the bind axis rotation `C` and its
//! inverse. Per frame it walks the hierarchy from the root and computes
//!
//! ```text
//! M   = R(dof[0], v0) · R(dof[1], v1) · ⋯
//! L   = Cinv · M · C · B
//! G   = G_parent · L
//! end = start + (G · direction) · length
//! ```
//!
//! where `direction` has already had the configured
//! [`DirectionCorrections`] applied. [`static_pose`] gives the bind layout
//! without rotations.
//!
//! # Examples
//!
//! ```no_run
//! use acclaim_amc::parse_motion;
//! use acclaim_asf::parse_skeleton;
//! use acclaim_fk::{FkOptions, ForwardKinematics};
//!
//! let skeleton = parse_skeleton(&std::fs::read_to_string("walk.asf")?)?;
//! let motion = parse_motion(&std::fs::read_to_string("walk.amc")?, &skeleton)?;
//!
//! let fk = ForwardKinematics::with_options(skeleton, FkOptions::new().with_strict(true))?;
//! for (frame, pose) in fk.evaluate_all(&motion)? {
//!     let hand = pose.get("lhand").map(|segment| segment.end);
//!     println!("{frame}: {hand:?}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//!
//! - `parallel` (default): evaluate frames with rayon in
//!   [`ForwardKinematics::evaluate_all`]
//! - `serde`: serialize [`Pose`] as `{bone: {start: {x, y, z}, end: {x, y, z}}}`

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod engine;
pub mod error;
pub mod options;
pub mod pose;
pub mod static_pose;
pub mod transform;
pub mod traversal;

pub use engine::ForwardKinematics;
pub use error::{FkError, Result};
pub use options::{DirectionCorrections, FkOptions};
pub use pose::{Pose, Segment};
pub use static_pose::static_pose;
pub use transform::BoneTransform;
