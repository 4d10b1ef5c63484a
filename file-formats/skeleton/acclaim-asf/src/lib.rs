//! Parser for Acclaim ASF (skeleton definition) files.
//!
//! An ASF file declares a skeleton as a set of bones, each with a bind-pose
//! direction, a length, a local axis orientation and the rotational degrees
//! of freedom that a matching AMC motion file animates. Sections are
//! introduced by a leading `:` and the bone graph is spelled out in the
//! `:hierarchy` section.
//!
//! # Examples
//!
//! ```
//! use acclaim_asf::parse_skeleton;
//!
//! let text = "\
//! :version 1.10
//! :name example
//! :root
//!    order TX TY TZ RX RY RZ
//!    position 0 0 0
//! :bonedata
//!   begin
//!     id 1
//!     name lowerback
//!     direction 0 1 0
//!     length 2.0
//!     axis 0 0 0 XYZ
//!     dof rx ry rz
//!     limits (-20 45)
//!            (-30 30)
//!            (-30 30)
//!   end
//! :hierarchy
//!   begin
//!     root lowerback
//!   end
//! ";
//!
//! let skeleton = parse_skeleton(text).unwrap();
//! assert_eq!(skeleton.name, "example");
//! assert_eq!(skeleton.root_children(), ["lowerback".to_string()]);
//! assert_eq!(skeleton.bone("lowerback").unwrap().limits.len(), 3);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{AsfError, Result};
pub use parser::parse_skeleton;
pub use types::{BoneAxis, BoneDefinition, Limit, ROOT, Skeleton};
pub use validation::{Severity, SkeletonIssue, validate_skeleton};

pub use acclaim_data::{Axis, AxisOrder, Channel, ParseError, ParseErrorKind};
