//! Engine configuration

use std::collections::BTreeSet;

use acclaim_asf::Skeleton;

/// Bones whose bind direction has its z component negated before posing
///
/// Many ASF exporters write arm and hand directions with the opposite z
/// sign to the rest of the skeleton. [`DirectionCorrections::from_naming_convention`]
/// reproduces that convention; an empty table disables it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionCorrections {
    flip_z: BTreeSet<String>,
}

impl DirectionCorrections {
    /// Table that corrects nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Flag every bone whose name contains "arm" or "hand" (case-insensitive)
    pub fn from_naming_convention(skeleton: &Skeleton) -> Self {
        skeleton
            .bones
            .keys()
            .filter(|name| follows_naming_convention(name))
            .cloned()
            .collect()
    }

    /// Add a bone to the table
    pub fn insert(&mut self, bone: impl Into<String>) -> bool {
        self.flip_z.insert(bone.into())
    }

    /// Whether `bone` has its direction z component negated
    pub fn flips_z(&self, bone: &str) -> bool {
        self.flip_z.contains(bone)
    }

    /// Flagged bone names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.flip_z.iter().map(String::as_str)
    }

    /// Number of flagged bones
    pub fn len(&self) -> usize {
        self.flip_z.len()
    }

    /// Whether no bone is flagged
    pub fn is_empty(&self) -> bool {
        self.flip_z.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DirectionCorrections {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            flip_z: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The arm/hand naming rule behind [`DirectionCorrections::from_naming_convention`]
pub fn follows_naming_convention(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("arm") || lower.contains("hand")
}

/// Options for [`ForwardKinematics`](crate::ForwardKinematics)
///
/// The defaults are lenient: undefined bones and revisited bones are skipped,
/// channel counts are not checked and the root orientation channels are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FkOptions {
    /// Turn tolerated hierarchy and channel problems into errors
    pub strict: bool,
    /// Seed the traversal with the root rotation channels
    pub apply_root_orientation: bool,
    /// Direction correction table; `None` derives it from bone names
    pub corrections: Option<DirectionCorrections>,
}

impl FkOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable or disable root orientation channels
    pub fn with_root_orientation(mut self, apply: bool) -> Self {
        self.apply_root_orientation = apply;
        self
    }

    /// Use an explicit correction table instead of the naming convention
    pub fn with_corrections(mut self, corrections: DirectionCorrections) -> Self {
        self.corrections = Some(corrections);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acclaim_asf::parse_skeleton;
    use test_case::test_case;

    #[test_case("lhumerus", false)]
    #[test_case("lowerarm", true)]
    #[test_case("LeftHand", true)]
    #[test_case("rHAND", true)]
    #[test_case("thorax", false)]
    fn test_naming_convention(name: &str, flagged: bool) {
        assert_eq!(follows_naming_convention(name), flagged);
    }

    #[test]
    fn test_table_from_skeleton() {
        let skeleton = parse_skeleton(
            ":bonedata\nbegin\nname lhand\nend\nbegin\nname upperarm\nend\nbegin\nname femur\nend\n",
        )
        .unwrap();
        let table = DirectionCorrections::from_naming_convention(&skeleton);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec!["lhand", "upperarm"]);
        assert!(!table.flips_z("femur"));
    }

    #[test]
    fn test_builder() {
        let options = FkOptions::new()
            .with_strict(true)
            .with_root_orientation(true)
            .with_corrections(DirectionCorrections::none());
        assert!(options.strict);
        assert!(options.apply_root_orientation);
        assert_eq!(options.corrections, Some(DirectionCorrections::none()));
    }
}
