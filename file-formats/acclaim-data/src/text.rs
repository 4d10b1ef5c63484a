//! Line iteration and numeric token parsing
//!
//! Acclaim files are read one trimmed line at a time. Blank lines and lines
//! starting with `#` carry no data in either format, so [`content_lines`]
//! filters them out while keeping the original 1-based line numbers for
//! error reporting.

use crate::error::{ParseError, ParseErrorKind};

/// Iterate over the meaningful lines of `text` as `(line_number, trimmed_line)`
///
/// # Examples
///
/// ```
/// use acclaim_data::text::content_lines;
///
/// let text = "# comment\n\n  :name test  \nbegin\n";
/// let lines: Vec<_> = content_lines(text).collect();
/// assert_eq!(lines, vec![(3, ":name test"), (4, "begin")]);
/// ```
pub fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse a finite floating point token
///
/// NaN, infinities and literals that overflow `f64` are rejected.
pub fn parse_float(token: &str, field: &str, line: usize) -> Result<f64, ParseError> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid_number(token, field, line)),
    }
}

/// Parse one bound of a `(min max)` limit pair
///
/// Unlike [`parse_float`], `inf` and `-inf` are accepted since ASF limits use
/// them for unbounded channels. NaN is still rejected.
pub fn parse_limit(token: &str, line: usize) -> Result<f64, ParseError> {
    match token.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(invalid_number(token, "limits", line)),
    }
}

/// Parse an integer token
pub fn parse_int(token: &str, field: &str, line: usize) -> Result<i64, ParseError> {
    token
        .parse::<i64>()
        .map_err(|_| invalid_number(token, field, line))
}

/// Parse the first `N` tokens as floats, failing if fewer than `N` are present
pub fn parse_floats<const N: usize>(
    tokens: &[&str],
    field: &str,
    line: usize,
) -> Result<[f64; N], ParseError> {
    if tokens.len() < N {
        return Err(ParseError::new(
            line,
            ParseErrorKind::MissingValues {
                field: field.to_string(),
                expected: N,
                found: tokens.len(),
            },
        ));
    }

    let mut values = [0.0; N];
    for (slot, token) in values.iter_mut().zip(tokens) {
        *slot = parse_float(token, field, line)?;
    }
    Ok(values)
}

fn invalid_number(token: &str, field: &str, line: usize) -> ParseError {
    ParseError::new(
        line,
        ParseErrorKind::InvalidNumber {
            field: field.to_string(),
            token: token.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_content_lines_keep_physical_numbers() {
        let text = "first\n   \n# skipped\n\tsecond\t\n";
        let lines: Vec<_> = content_lines(text).collect();
        assert_eq!(lines, vec![(1, "first"), (4, "second")]);
    }

    #[test_case("1.5", 1.5 ; "plain")]
    #[test_case("-0", 0.0 ; "negative zero")]
    #[test_case("1e2", 100.0 ; "exponent")]
    fn test_parse_float_accepts(token: &str, expected: f64) {
        assert_eq!(parse_float(token, "value", 1).ok(), Some(expected));
    }

    #[test_case("NaN" ; "nan")]
    #[test_case("abc" ; "word")]
    #[test_case("1.2.3" ; "two dots")]
    #[test_case("" ; "empty")]
    #[test_case("inf" ; "infinity")]
    #[test_case("-inf" ; "negative infinity")]
    #[test_case("infinity" ; "spelled out infinity")]
    #[test_case("1e400" ; "overflow")]
    fn test_parse_float_rejects(token: &str) {
        let error = parse_float(token, "length", 7).unwrap_err();
        assert_eq!(error.line, 7);
        assert!(matches!(error.kind, ParseErrorKind::InvalidNumber { .. }));
    }

    #[test_case("inf", f64::INFINITY ; "infinity")]
    #[test_case("-inf", f64::NEG_INFINITY ; "negative infinity")]
    #[test_case("-12.5", -12.5 ; "finite")]
    fn test_parse_limit_accepts(token: &str, expected: f64) {
        assert_eq!(parse_limit(token, 1).ok(), Some(expected));
    }

    #[test]
    fn test_parse_limit_rejects_nan() {
        let error = parse_limit("nan", 3).unwrap_err();
        assert_eq!(error.line, 3);
        assert_eq!(
            error.kind,
            ParseErrorKind::InvalidNumber {
                field: "limits".to_string(),
                token: "nan".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42", "id", 1).ok(), Some(42));
        assert!(parse_int("4.2", "id", 1).is_err());
    }

    #[test]
    fn test_parse_floats_arity() {
        let values: [f64; 3] = parse_floats(&["1", "2", "3", "extra"], "direction", 1).unwrap();
        assert_eq!(values, [1.0, 2.0, 3.0]);

        let error = parse_floats::<3>(&["1", "2"], "direction", 9).unwrap_err();
        assert_eq!(
            error.kind,
            ParseErrorKind::MissingValues {
                field: "direction".to_string(),
                expected: 3,
                found: 2,
            }
        );
    }
}
