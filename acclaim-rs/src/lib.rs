//! Acclaim-RS library
//!
//! Command definitions and terminal helpers behind the `acclaim-rs` binary.

pub mod cli;
pub mod commands;
pub mod utils;
