//! Formatting utilities

use acclaim_data::DVec3;

/// Format a vector as `(x, y, z)` with fixed precision
pub fn format_vec(value: DVec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", value.x, value.y, value.z)
}

/// Format an inclusive numeric range, collapsing single values
pub fn format_range(first: i64, last: i64) -> String {
    if first == last {
        first.to_string()
    } else {
        format!("{first}..={last}")
    }
}

/// Join channel names for display, or `-` when there are none
pub fn format_channels(channels: &[String]) -> String {
    if channels.is_empty() {
        "-".to_string()
    } else {
        channels.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_vec() {
        assert_eq!(format_vec(DVec3::new(1.0, -0.5, 0.0)), "(1.0000, -0.5000, 0.0000)");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(1, 1), "1");
        assert_eq!(format_range(1, 120), "1..=120");
    }

    #[test]
    fn test_format_channels() {
        assert_eq!(format_channels(&[]), "-");
        assert_eq!(
            format_channels(&["rx".to_string(), "rz".to_string()]),
            "rx rz"
        );
    }
}
