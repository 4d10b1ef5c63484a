//! Shared building blocks for the Acclaim motion-capture crates.
//!
//! Both Acclaim formats are line-oriented text: the skeleton file (ASF) and
//! the motion file (AMC) share the same comment and blank-line rules, the same
//! numeric token conventions, and the same `x`/`y`/`z` axis vocabulary. This
//! crate holds those pieces so the format crates agree on them:
//!
//! - [`ParseError`] and [`ParseErrorKind`], the line-tagged error both parsers
//!   report
//! - [`text`], the line iterator and fallible numeric token parsing
//! - [`Axis`], [`AxisOrder`] and [`Channel`], plus the elementary rotation
//!   matrices built from them

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod axis;
pub mod error;
pub mod text;

pub use axis::{Axis, AxisOrder, Channel};
pub use error::{ParseError, ParseErrorKind};

/// Re-export of the math types used across the workspace
pub use glam::{DMat3, DVec3};
