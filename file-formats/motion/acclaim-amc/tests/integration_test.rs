//! Integration tests for the AMC parser against a full subject file

use acclaim_amc::{Motion, parse_motion, validate_motion};
use acclaim_asf::{Skeleton, parse_skeleton};
use pretty_assertions::assert_eq;
use test_case::test_case;

const WALK_ASF: &str = include_str!("../../../../test-data/walk.asf");
const WALK_AMC: &str = include_str!("../../../../test-data/walk.amc");

fn load() -> (Skeleton, Motion) {
    let skeleton = parse_skeleton(WALK_ASF).expect("skeleton fixture parses");
    let motion = parse_motion(WALK_AMC, &skeleton).expect("motion fixture parses");
    (skeleton, motion)
}

#[test]
fn test_header_and_frames() {
    let (_, motion) = load();
    assert_eq!(motion.keywords, vec!["FULLY-SPECIFIED", "DEGREES"]);
    assert_eq!(motion.frame_count(), 3);
    assert_eq!(motion.frame_range(), Some((1, 3)));
}

#[test_case("root", 6)]
#[test_case("lfemur", 3)]
#[test_case("ltibia", 1)]
#[test_case("lclavicle", 2)]
#[test_case("lhand", 2)]
fn test_channel_widths(bone: &str, width: usize) {
    let (_, motion) = load();
    for (number, frame) in motion.iter() {
        let values = frame
            .channel(bone)
            .unwrap_or_else(|| panic!("frame {number} has no '{bone}'"));
        assert_eq!(values.len(), width);
    }
}

#[test]
fn test_values_are_read_verbatim() {
    let (_, motion) = load();
    let frame = motion.frame(2).unwrap();
    assert_eq!(frame.channel("ltibia"), Some(&[28.3342][..]));
    assert_eq!(frame.len(), 12);
    assert_eq!(frame.channel("lhipjoint"), None);
}

#[test]
fn test_fixture_matches_skeleton() {
    let (skeleton, motion) = load();
    assert!(validate_motion(&motion, &skeleton).is_empty());
}

#[test]
fn test_skeleton_does_not_change_result() {
    let (_, motion) = load();
    let unaligned = parse_motion(WALK_AMC, &Skeleton::default()).unwrap();
    assert_eq!(motion, unaligned);
}
