//! Error types for forward kinematics

use acclaim_amc::FrameNumber;
use thiserror::Error;

/// Errors raised while preparing or evaluating a skeleton
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FkError {
    /// A bone's axis rotation cannot be inverted
    #[error("axis matrix of bone '{bone}' is singular (determinant {determinant})")]
    SingularAxis {
        /// Bone name
        bone: String,
        /// Determinant of the axis matrix
        determinant: f64,
    },

    /// Strict mode: the hierarchy names a bone that has no definition
    #[error("'{parent}' lists child '{bone}' which has no bone definition")]
    MissingBone {
        /// Parent in the hierarchy
        parent: String,
        /// Undefined child
        bone: String,
    },

    /// Strict mode: traversal reached a bone a second time
    #[error("bone '{bone}' is reached more than once; the hierarchy is not a tree")]
    CyclicHierarchy {
        /// Bone reached again
        bone: String,
    },

    /// Strict mode: a frame carries the wrong number of values for a bone
    #[error("bone '{bone}' declares {expected} dof channel(s) but the frame has {found} value(s)")]
    ChannelCountMismatch {
        /// Bone name
        bone: String,
        /// Number of dof entries
        expected: usize,
        /// Number of values in the frame
        found: usize,
    },

    /// The requested frame is not in the motion
    #[error("frame {0} is not present in the motion")]
    MissingFrame(FrameNumber),
}

/// Result type for forward kinematics operations
pub type Result<T> = std::result::Result<T, FkError>;
