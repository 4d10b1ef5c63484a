//! Structural checks for parsed skeletons
//!
//! The parser accepts anything the grammar allows; this module reports the
//! things a consumer usually wants to know about before evaluating poses.
//! Nothing here is fatal to forward kinematics, which skips what it cannot
//! resolve, but [`Severity::Error`] issues mean part of the skeleton will not
//! be posed the way the file intends.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::types::{ROOT, Skeleton};

/// How serious a [`SkeletonIssue`] is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Tolerated, but probably unintended
    Warning,
    /// Part of the skeleton cannot be posed as declared
    Error,
}

/// A single finding from [`validate_skeleton`]
#[derive(Debug, Clone, PartialEq)]
pub enum SkeletonIssue {
    /// The hierarchy has no `root` entry, so no bone is reachable
    MissingRootEntry,
    /// A hierarchy child has no bone definition; its subtree is dropped
    UndefinedChild {
        /// Parent listing the child
        parent: String,
        /// Name with no definition
        child: String,
    },
    /// A bone is listed under more than one parent
    MultipleParents {
        /// Bone name
        bone: String,
        /// Every parent that lists it
        parents: Vec<String>,
    },
    /// Following the hierarchy from a bone leads back to it
    Cycle {
        /// A bone on the cycle
        bone: String,
    },
    /// A defined bone is not reachable from the root
    Unreachable {
        /// Bone name
        bone: String,
    },
    /// `limits` has a different number of pairs than `dof` has channels
    LimitsMismatch {
        /// Bone name
        bone: String,
        /// Number of dof channels
        dof: usize,
        /// Number of limit pairs
        limits: usize,
    },
    /// A dof entry is not a recognized channel name
    UnknownChannel {
        /// Bone name
        bone: String,
        /// Offending dof entry
        channel: String,
    },
    /// The bind direction is not unit length
    NonUnitDirection {
        /// Bone name
        bone: String,
        /// Actual direction length
        length: f64,
    },
    /// The bone length is negative
    NegativeLength {
        /// Bone name
        bone: String,
        /// Declared length
        length: f64,
    },
}

impl SkeletonIssue {
    /// Severity of this issue
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingRootEntry | Self::MultipleParents { .. } | Self::Cycle { .. } => {
                Severity::Error
            }
            Self::UndefinedChild { .. }
            | Self::Unreachable { .. }
            | Self::LimitsMismatch { .. }
            | Self::UnknownChannel { .. }
            | Self::NonUnitDirection { .. }
            | Self::NegativeLength { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for SkeletonIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRootEntry => write!(f, "hierarchy has no '{ROOT}' entry"),
            Self::UndefinedChild { parent, child } => {
                write!(f, "'{parent}' lists undefined child '{child}'")
            }
            Self::MultipleParents { bone, parents } => {
                write!(f, "'{bone}' has several parents: {}", parents.join(", "))
            }
            Self::Cycle { bone } => write!(f, "hierarchy cycle through '{bone}'"),
            Self::Unreachable { bone } => write!(f, "'{bone}' is not reachable from root"),
            Self::LimitsMismatch { bone, dof, limits } => write!(
                f,
                "'{bone}' declares {dof} dof channel(s) but {limits} limit pair(s)"
            ),
            Self::UnknownChannel { bone, channel } => {
                write!(f, "'{bone}' has unknown dof channel '{channel}'")
            }
            Self::NonUnitDirection { bone, length } => {
                write!(f, "'{bone}' direction has length {length:.6}")
            }
            Self::NegativeLength { bone, length } => {
                write!(f, "'{bone}' has negative length {length}")
            }
        }
    }
}

/// Tolerance for considering a direction unit length
const UNIT_TOLERANCE: f64 = 1e-3;

/// Check a skeleton for structural problems
pub fn validate_skeleton(skeleton: &Skeleton) -> Vec<SkeletonIssue> {
    let mut issues = Vec::new();

    validate_hierarchy(skeleton, &mut issues);
    validate_bones(skeleton, &mut issues);

    issues
}

fn validate_hierarchy(skeleton: &Skeleton, issues: &mut Vec<SkeletonIssue>) {
    if !skeleton.hierarchy.contains_key(ROOT) {
        issues.push(SkeletonIssue::MissingRootEntry);
    }

    let mut parents_of: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (parent, children) in &skeleton.hierarchy {
        for child in children {
            parents_of.entry(child).or_default().push(parent);
            if skeleton.bone(child).is_none() {
                issues.push(SkeletonIssue::UndefinedChild {
                    parent: parent.clone(),
                    child: child.clone(),
                });
            }
        }
    }

    for (bone, parents) in &parents_of {
        if parents.len() > 1 {
            issues.push(SkeletonIssue::MultipleParents {
                bone: (*bone).to_string(),
                parents: parents.iter().map(|p| (*p).to_string()).collect(),
            });
        }
    }

    // Walk from root; anything seen twice is on a cycle or shared
    let mut reachable = BTreeSet::new();
    let mut stack: Vec<&str> = skeleton.root_children().iter().map(String::as_str).collect();
    while let Some(name) = stack.pop() {
        if !reachable.insert(name) {
            continue;
        }
        stack.extend(skeleton.children(name).iter().map(String::as_str));
    }

    for name in skeleton.hierarchy.keys() {
        if on_cycle(skeleton, name) {
            issues.push(SkeletonIssue::Cycle { bone: name.clone() });
        }
    }

    for name in skeleton.bones.keys() {
        if !reachable.contains(name.as_str()) {
            issues.push(SkeletonIssue::Unreachable { bone: name.clone() });
        }
    }
}

/// Whether `start` can reach itself through the hierarchy
fn on_cycle(skeleton: &Skeleton, start: &str) -> bool {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<&str> = skeleton.children(start).iter().map(String::as_str).collect();
    while let Some(name) = stack.pop() {
        if name == start {
            return true;
        }
        if seen.insert(name) {
            stack.extend(skeleton.children(name).iter().map(String::as_str));
        }
    }
    false
}

fn validate_bones(skeleton: &Skeleton, issues: &mut Vec<SkeletonIssue>) {
    for bone in skeleton.bones.values() {
        if !bone.limits.is_empty() && bone.limits.len() != bone.dof.len() {
            issues.push(SkeletonIssue::LimitsMismatch {
                bone: bone.name.clone(),
                dof: bone.dof.len(),
                limits: bone.limits.len(),
            });
        }

        for (channel, parsed) in bone.dof.iter().zip(bone.channels()) {
            if parsed.is_none() {
                issues.push(SkeletonIssue::UnknownChannel {
                    bone: bone.name.clone(),
                    channel: channel.clone(),
                });
            }
        }

        let length = bone.direction.length();
        if (length - 1.0).abs() > UNIT_TOLERANCE {
            issues.push(SkeletonIssue::NonUnitDirection {
                bone: bone.name.clone(),
                length,
            });
        }

        if bone.length < 0.0 {
            issues.push(SkeletonIssue::NegativeLength {
                bone: bone.name.clone(),
                length: bone.length,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_skeleton;

    const CLEAN: &str = "\
:bonedata
begin
name a
direction 0 1 0
length 1
dof rx ry
limits (-1 1) (-2 2)
end
begin
name b
direction 1 0 0
length 2
end
:hierarchy
begin
root a
a b
end
";

    #[test]
    fn test_clean_skeleton_has_no_issues() {
        let skeleton = parse_skeleton(CLEAN).unwrap();
        assert!(validate_skeleton(&skeleton).is_empty());
    }

    #[test]
    fn test_reports_undefined_child_and_unreachable() {
        let mut skeleton = parse_skeleton(CLEAN).unwrap();
        skeleton
            .hierarchy
            .insert("a".to_string(), vec!["ghost".to_string()]);

        let issues = validate_skeleton(&skeleton);
        assert!(issues.contains(&SkeletonIssue::UndefinedChild {
            parent: "a".to_string(),
            child: "ghost".to_string(),
        }));
        assert!(issues.contains(&SkeletonIssue::Unreachable {
            bone: "b".to_string()
        }));
        assert!(issues.iter().all(|i| i.severity() == Severity::Warning));
    }

    #[test]
    fn test_reports_cycle() {
        let mut skeleton = parse_skeleton(CLEAN).unwrap();
        skeleton
            .hierarchy
            .insert("b".to_string(), vec!["a".to_string()]);

        let issues = validate_skeleton(&skeleton);
        assert!(issues.contains(&SkeletonIssue::Cycle {
            bone: "a".to_string()
        }));
        assert!(issues.iter().any(|i| matches!(
            i,
            SkeletonIssue::MultipleParents { bone, .. } if bone == "a"
        )));
        assert!(issues.iter().any(|i| i.severity() == Severity::Error));
    }

    #[test]
    fn test_reports_bone_field_problems() {
        let text = "\
:bonedata
begin
name a
direction 0 2 0
length -1
dof rx wobble
limits (-1 1)
end
:hierarchy
begin
root a
end
";
        let skeleton = parse_skeleton(text).unwrap();
        let issues = validate_skeleton(&skeleton);
        assert_eq!(issues.len(), 4, "{issues:?}");
        assert!(issues.iter().any(|i| matches!(i, SkeletonIssue::LimitsMismatch { dof: 2, limits: 1, .. })));
        assert!(issues.iter().any(|i| matches!(i, SkeletonIssue::UnknownChannel { channel, .. } if channel == "wobble")));
        assert!(issues.iter().any(|i| matches!(i, SkeletonIssue::NonUnitDirection { .. })));
        assert!(issues.iter().any(|i| matches!(i, SkeletonIssue::NegativeLength { .. })));
    }

    #[test]
    fn test_missing_root_entry() {
        let skeleton = parse_skeleton(":name empty\n").unwrap();
        assert_eq!(
            validate_skeleton(&skeleton),
            vec![SkeletonIssue::MissingRootEntry]
        );
        assert_eq!(
            SkeletonIssue::MissingRootEntry.to_string(),
            "hierarchy has no 'root' entry"
        );
    }
}
