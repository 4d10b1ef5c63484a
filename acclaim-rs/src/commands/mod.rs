//! Command implementations for each file format

pub mod amc;
pub mod asf;
pub mod pose;
