//! Error handling for ASF parsing

use acclaim_data::ParseError;
use thiserror::Error;

/// Errors that can occur when working with ASF files
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsfError {
    /// The text violated the ASF grammar
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AsfError {
    /// Line number of the offending input
    pub fn line(&self) -> usize {
        match self {
            Self::Parse(error) => error.line,
        }
    }
}

/// Type alias for Results from ASF operations
pub type Result<T> = std::result::Result<T, AsfError>;
