//! Consistency checks between a motion and its skeleton

use std::collections::BTreeSet;
use std::fmt;

use acclaim_asf::{ROOT, Skeleton};

use crate::types::{FrameNumber, Motion};

/// A single finding from [`validate_motion`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionIssue {
    /// The motion has no frames
    NoFrames,
    /// Channels recorded for a name the skeleton does not define
    UnknownBone {
        /// Name used in the motion
        bone: String,
        /// First frame it appears in
        first_frame: FrameNumber,
    },
    /// A bone line carries a different number of values than the bone has channels
    ChannelCountMismatch {
        /// Bone name
        bone: String,
        /// First frame with the mismatch
        first_frame: FrameNumber,
        /// Channels declared by the skeleton
        expected: usize,
        /// Values present in the motion
        found: usize,
    },
    /// Frame numbers skip over a range
    FrameGap {
        /// Last frame before the gap
        after: FrameNumber,
        /// First frame after the gap
        before: FrameNumber,
    },
}

impl fmt::Display for MotionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFrames => write!(f, "motion has no frames"),
            Self::UnknownBone { bone, first_frame } => write!(
                f,
                "'{bone}' is not in the skeleton (first seen in frame {first_frame})"
            ),
            Self::ChannelCountMismatch {
                bone,
                first_frame,
                expected,
                found,
            } => write!(
                f,
                "'{bone}' has {found} value(s) but {expected} channel(s) (first in frame {first_frame})"
            ),
            Self::FrameGap { after, before } => {
                write!(f, "frames jump from {after} to {before}")
            }
        }
    }
}

/// Number of values the skeleton expects on a bone line, if the bone exists
///
/// The root line is sized by the root `order`; every other bone by its `dof`.
pub fn expected_channels(skeleton: &Skeleton, name: &str) -> Option<usize> {
    if name == ROOT {
        Some(skeleton.root_order().len())
    } else {
        skeleton.bone(name).map(|bone| bone.dof.len())
    }
}

/// Compare a motion against the skeleton it animates
///
/// Each bone is reported at most once per issue kind, at the first frame it
/// occurs in.
pub fn validate_motion(motion: &Motion, skeleton: &Skeleton) -> Vec<MotionIssue> {
    let mut issues = Vec::new();

    if motion.frames.is_empty() {
        issues.push(MotionIssue::NoFrames);
        return issues;
    }

    let mut reported = BTreeSet::new();
    for (number, frame) in motion.iter() {
        for (name, values) in frame.iter() {
            if reported.contains(name) {
                continue;
            }
            match expected_channels(skeleton, name) {
                None => {
                    reported.insert(name);
                    issues.push(MotionIssue::UnknownBone {
                        bone: name.to_string(),
                        first_frame: number,
                    });
                }
                Some(expected) if expected != values.len() => {
                    reported.insert(name);
                    issues.push(MotionIssue::ChannelCountMismatch {
                        bone: name.to_string(),
                        first_frame: number,
                        expected,
                        found: values.len(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    let numbers: Vec<FrameNumber> = motion.frames.keys().copied().collect();
    for pair in numbers.windows(2) {
        if pair[1] - pair[0] > 1 {
            issues.push(MotionIssue::FrameGap {
                after: pair[0],
                before: pair[1],
            });
        }
    }

    issues
}
