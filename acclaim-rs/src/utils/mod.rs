//! Shared utilities for the acclaim-rs CLI

pub mod format;
pub mod io;
pub mod progress;
pub mod table;
pub mod tree;

pub use format::*;
pub use io::*;
pub use progress::*;
pub use table::*;
pub use tree::*;
