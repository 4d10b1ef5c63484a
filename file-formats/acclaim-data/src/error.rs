//! Line-tagged parse errors shared by the ASF and AMC parsers

use thiserror::Error;

/// A structural or numeric error found while parsing an Acclaim text file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line {line}: {kind}")]
pub struct ParseError {
    /// 1-based physical line number the error was detected on
    pub line: usize,
    /// What went wrong
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create an error for the given line
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

/// The reason a line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A token that must be numeric did not parse, or parsed to NaN
    #[error("invalid numeric value '{token}' for {field}")]
    InvalidNumber {
        /// Field or channel the token belongs to
        field: String,
        /// The offending token
        token: String,
    },

    /// A field line carried fewer values than the field requires
    #[error("{field} expects {expected} value(s), found {found}")]
    MissingValues {
        /// Field name
        field: String,
        /// Number of values required
        expected: usize,
        /// Number of values present
        found: usize,
    },

    /// An axis order token used letters other than x/y/z, or had the wrong length
    #[error("invalid axis order '{0}': expected 1 to 3 of the letters x, y, z")]
    InvalidAxisOrder(String),

    /// An `end` marker with no open `begin`
    #[error("'end' without a matching 'begin' in :{section}")]
    UnmatchedEnd {
        /// Section the marker was found in
        section: String,
    },

    /// A `begin` marker that was never closed
    #[error("'begin' without a matching 'end' in :{section}")]
    UnmatchedBegin {
        /// Section the marker was found in
        section: String,
    },

    /// A parenthesized limits pair that is not exactly two values
    #[error("malformed limits pair '{0}'")]
    InvalidLimits(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ParseError::new(
            12,
            ParseErrorKind::InvalidNumber {
                field: "length".to_string(),
                token: "abc".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "Parse error at line 12: invalid numeric value 'abc' for length"
        );

        let error = ParseError::new(
            3,
            ParseErrorKind::UnmatchedEnd {
                section: "hierarchy".to_string(),
            },
        );
        assert_eq!(
            error.to_string(),
            "Parse error at line 3: 'end' without a matching 'begin' in :hierarchy"
        );
    }
}
