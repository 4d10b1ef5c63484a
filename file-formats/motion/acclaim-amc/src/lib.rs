//! Parser for Acclaim AMC (motion capture) files.
//!
//! An AMC file is a sequence of frames. Each frame starts with a line holding
//! only the frame number, followed by one line per animated bone:
//!
//! ```text
//! :FULLY-SPECIFIED
//! :DEGREES
//! 1
//! root 9.37 17.86 -17.31 -2.01 -4.91 -1.25
//! lfemur -13.31 -4.91 -17.74
//! ```
//!
//! The values on a bone line line up with that bone's `dof` list in the
//! matching ASF skeleton (and with the root `order` for `root`). This crate
//! only records the values; reconciling them with the skeleton is the job of
//! the forward kinematics engine.
//!
//! # Examples
//!
//! ```
//! use acclaim_amc::parse_motion;
//! use acclaim_asf::Skeleton;
//!
//! let motion = parse_motion(":DEGREES\n1\nroot 0 1 2 0 0 0\n2\nroot 0 1.5 2 0 0 0\n", &Skeleton::default()).unwrap();
//! assert_eq!(motion.frame_count(), 2);
//! assert_eq!(motion.frame(2).unwrap().channel("root").unwrap()[1], 1.5);
//! assert!(motion.has_keyword("degrees"));
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{AmcError, Result};
pub use parser::parse_motion;
pub use types::{Frame, FrameNumber, Motion};
pub use validation::{MotionIssue, expected_channels, validate_motion};
