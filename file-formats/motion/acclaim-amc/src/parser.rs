//! Frame-by-frame reader for AMC text

use acclaim_asf::Skeleton;
use acclaim_data::text::{content_lines, parse_float};
use log::{debug, trace};

use crate::error::Result;
use crate::types::{Frame, FrameNumber, Motion};
use crate::validation::expected_channels;

/// Parse AMC text into a [`Motion`]
///
/// `skeleton` is only consulted for diagnostics: bone lines that name an
/// unknown bone, or carry a different number of values than the bone has
/// channels, are logged at debug level and kept as written.
///
/// Data lines before the first frame marker are dropped. A repeated frame
/// number replaces the earlier frame.
pub fn parse_motion(text: &str, skeleton: &Skeleton) -> Result<Motion> {
    let mut motion = Motion::default();
    let mut current: Option<(FrameNumber, Frame)> = None;

    for (line_number, line) in content_lines(text) {
        if let Some(keyword) = line.strip_prefix(':') {
            motion.keywords.push(keyword.trim().to_string());
            continue;
        }

        if let Ok(number) = line.parse::<FrameNumber>() {
            if let Some((finished, frame)) = current.take() {
                store_frame(&mut motion, finished, frame);
            }
            current = Some((number, Frame::new()));
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };

        let Some((number, frame)) = current.as_mut() else {
            trace!("line {line_number}: dropping '{name}' before the first frame");
            continue;
        };

        let values = tokens
            .map(|token| parse_float(token, name, line_number))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        check_alignment(skeleton, *number, name, values.len());

        if frame.insert(name, values).is_some() {
            trace!("line {line_number}: '{name}' repeated in frame {number}");
        }
    }

    if let Some((number, frame)) = current {
        store_frame(&mut motion, number, frame);
    }

    debug!(
        "Parsed {} frame(s), keywords: {:?}",
        motion.frame_count(),
        motion.keywords
    );

    Ok(motion)
}

fn store_frame(motion: &mut Motion, number: FrameNumber, frame: Frame) {
    if motion.frames.insert(number, frame).is_some() {
        debug!("Frame {number} appears more than once; keeping the later one");
    }
}

fn check_alignment(skeleton: &Skeleton, frame: FrameNumber, name: &str, found: usize) {
    match expected_channels(skeleton, name) {
        None => debug!("frame {frame}: '{name}' is not a bone in the skeleton"),
        Some(expected) if expected != found => debug!(
            "frame {frame}: '{name}' has {found} value(s), skeleton declares {expected}"
        ),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmcError;
    use acclaim_data::ParseErrorKind;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Result<Motion> {
        parse_motion(text, &Skeleton::default())
    }

    #[test]
    fn test_frames_and_keywords() {
        let motion = parse(
            ":FULLY-SPECIFIED\n:DEGREES\n1\nroot 0 0 0 1 2 3\nlfemur 10 20 30\n2\nlfemur -1 -2 -3\n",
        )
        .unwrap();

        assert_eq!(motion.keywords, vec!["FULLY-SPECIFIED", "DEGREES"]);
        assert_eq!(motion.frame_count(), 2);
        assert_eq!(
            motion.frame(1).unwrap().channel("lfemur"),
            Some(&[10.0, 20.0, 30.0][..])
        );
        assert_eq!(motion.frame(2).unwrap().channel("root"), None);
        assert_eq!(
            motion.frame(2).unwrap().channel("lfemur"),
            Some(&[-1.0, -2.0, -3.0][..])
        );
    }

    #[test]
    fn test_lines_before_first_frame_are_dropped() {
        let motion = parse("root 1 2 3\n# comment\n\n5\nroot 4 5 6\n").unwrap();
        assert_eq!(motion.frame_count(), 1);
        assert_eq!(
            motion.frame(5).unwrap().channel("root"),
            Some(&[4.0, 5.0, 6.0][..])
        );
    }

    #[test]
    fn test_duplicate_frame_replaces_previous() {
        let motion = parse("1\na 1\nb 2\n1\na 3\n").unwrap();
        let frame = motion.frame(1).unwrap();
        assert_eq!(frame.channel("a"), Some(&[3.0][..]));
        assert_eq!(frame.channel("b"), None);
    }

    #[test]
    fn test_repeated_bone_overwrites_within_frame() {
        let motion = parse("1\na 1\na 2 3\n").unwrap();
        assert_eq!(motion.frame(1).unwrap().channel("a"), Some(&[2.0, 3.0][..]));
    }

    #[test]
    fn test_non_numeric_value_is_error() {
        let err = parse("1\nroot 0 zero 0\n").unwrap_err();
        let AmcError::Parse(parse_err) = err;
        assert_eq!(parse_err.line, 2);
        assert!(matches!(
            parse_err.kind,
            ParseErrorKind::InvalidNumber { ref token, .. } if token == "zero"
        ));
    }

    #[test]
    fn test_non_finite_value_is_error() {
        for (text, token) in [
            ("1\nroot 0 0 0 0 0 0\nfemur 1e400\n", "1e400"),
            ("1\nfemur inf\n", "inf"),
            ("1\nfemur -infinity\n", "-infinity"),
        ] {
            let AmcError::Parse(parse_err) = parse(text).unwrap_err();
            assert!(matches!(
                parse_err.kind,
                ParseErrorKind::InvalidNumber { token: ref found, .. } if found == token
            ));
        }
    }

    #[test]
    fn test_negative_and_empty_frames() {
        let motion = parse("-3\n0\nroot 1\n").unwrap();
        assert_eq!(motion.frame_range(), Some((-3, 0)));
        assert!(motion.frame(-3).unwrap().is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap(), Motion::default());
    }
}
