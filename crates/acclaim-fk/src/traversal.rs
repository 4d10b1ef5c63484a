//! Depth-first walk of a skeleton hierarchy
//!
//! The walk uses an explicit stack, so hierarchy depth is not bounded by the
//! call stack, and keeps a visited set so malformed hierarchies terminate.

use std::collections::BTreeSet;

use acclaim_asf::{BoneDefinition, ROOT, Skeleton};
use acclaim_data::{DMat3, DVec3};

use crate::pose::{Pose, Segment};

/// Position and accumulated rotation carried from a bone to its children
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    /// World-space position
    pub position: DVec3,
    /// Global rotation
    pub rotation: DMat3,
}

impl Joint {
    /// Joint at `position` with no rotation
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            rotation: DMat3::IDENTITY,
        }
    }
}

/// What the walk found at a hierarchy entry
#[derive(Debug, Clone, Copy)]
pub enum Visit<'a> {
    /// A defined bone reached for the first time
    Bone(&'a BoneDefinition),
    /// A child name with no bone definition
    Missing {
        /// Parent listing the child
        parent: &'a str,
        /// Undefined child name
        bone: &'a str,
    },
    /// A bone reached a second time
    Revisited(&'a str),
}

/// Walk the hierarchy from the synthetic root, children in declared order
///
/// `visit` receives each hierarchy entry together with the parent's joint.
/// Returning `Some(joint)` for a bone records the segment from the parent's
/// position to `joint.position` and continues into the bone's children with
/// `joint`; returning `None` prunes the subtree. The value returned for
/// [`Visit::Missing`] and [`Visit::Revisited`] is ignored, as those entries are
/// never descended into.
pub fn traverse<E, F>(skeleton: &Skeleton, origin: Joint, mut visit: F) -> Result<Pose, E>
where
    F: FnMut(Visit<'_>, &Joint) -> Result<Option<Joint>, E>,
{
    let mut pose = Pose::default();
    let mut visited = BTreeSet::new();
    let mut stack: Vec<(&str, &str, Joint)> = Vec::new();

    push_children(&mut stack, skeleton, ROOT, origin);

    while let Some((parent, name, from)) = stack.pop() {
        if !visited.insert(name) {
            visit(Visit::Revisited(name), &from)?;
            continue;
        }

        let Some(bone) = skeleton.bone(name) else {
            visit(Visit::Missing { parent, bone: name }, &from)?;
            continue;
        };

        if let Some(joint) = visit(Visit::Bone(bone), &from)? {
            pose.insert(
                name,
                Segment {
                    start: from.position,
                    end: joint.position,
                },
            );
            push_children(&mut stack, skeleton, name, joint);
        }
    }

    Ok(pose)
}

fn push_children<'a>(
    stack: &mut Vec<(&'a str, &'a str, Joint)>,
    skeleton: &'a Skeleton,
    parent: &'a str,
    joint: Joint,
) {
    // Reversed so the first declared child is popped first
    for child in skeleton.children(parent).iter().rev() {
        stack.push((parent, child.as_str(), joint));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acclaim_asf::parse_skeleton;
    use pretty_assertions::assert_eq;
    use std::convert::Infallible;

    const BRANCHING: &str = "\
:bonedata
begin
name a
end
begin
name b
end
begin
name c
end
begin
name d
end
:hierarchy
begin
root a d
a b c
end
";

    #[test]
    fn test_visits_in_declared_depth_first_order() {
        let skeleton = parse_skeleton(BRANCHING).unwrap();
        let mut order = Vec::new();
        let pose = traverse(&skeleton, Joint::at(DVec3::ZERO), |visit, from| {
            if let Visit::Bone(bone) = visit {
                order.push(bone.name.clone());
            }
            Ok::<_, Infallible>(Some(*from))
        })
        .unwrap();

        assert_eq!(order, vec!["a", "b", "c", "d"]);
        assert_eq!(pose.len(), 4);
    }

    #[test]
    fn test_reports_missing_and_revisited() {
        let mut skeleton = parse_skeleton(BRANCHING).unwrap();
        skeleton
            .hierarchy
            .insert("c".to_string(), vec!["ghost".to_string(), "a".to_string()]);

        let mut missing = Vec::new();
        let mut revisited = Vec::new();
        let pose = traverse(&skeleton, Joint::at(DVec3::ZERO), |visit, from| {
            match visit {
                Visit::Missing { parent, bone } => missing.push((parent.to_string(), bone.to_string())),
                Visit::Revisited(name) => revisited.push(name.to_string()),
                Visit::Bone(_) => {}
            }
            Ok::<_, Infallible>(Some(*from))
        })
        .unwrap();

        assert_eq!(missing, vec![("c".to_string(), "ghost".to_string())]);
        assert_eq!(revisited, vec!["a".to_string()]);
        assert_eq!(pose.len(), 4);
    }

    #[test]
    fn test_pruned_subtree_is_absent() {
        let skeleton = parse_skeleton(BRANCHING).unwrap();
        let pose = traverse(&skeleton, Joint::at(DVec3::ZERO), |visit, from| {
            Ok::<_, Infallible>(match visit {
                Visit::Bone(bone) if bone.name == "a" => None,
                _ => Some(*from),
            })
        })
        .unwrap();

        assert_eq!(pose.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["d"]);
    }

    #[test]
    fn test_error_stops_walk() {
        let skeleton = parse_skeleton(BRANCHING).unwrap();
        let result = traverse(&skeleton, Joint::at(DVec3::ZERO), |visit, from| match visit {
            Visit::Bone(bone) if bone.name == "c" => Err("stop"),
            _ => Ok(Some(*from)),
        });
        assert_eq!(result, Err("stop"));
    }
}
