//! Error handling for AMC parsing

use acclaim_data::ParseError;
use thiserror::Error;

/// Errors that can occur when working with AMC files
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmcError {
    /// The text violated the AMC grammar
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Type alias for Results from AMC operations
pub type Result<T> = std::result::Result<T, AmcError>;
