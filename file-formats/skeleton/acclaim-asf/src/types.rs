//! Data structures produced by the ASF parser

use std::collections::BTreeMap;

use acclaim_data::text::parse_float;
use acclaim_data::{AxisOrder, Channel, DMat3, DVec3};
use log::debug;

/// Name of the synthetic parent whose children are the topmost real bones
pub const ROOT: &str = "root";

/// A parsed ASF skeleton
///
/// All mappings are ordered by key so that two parses of the same text
/// compare and serialize identically.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skeleton {
    /// Value of the `:version` section
    pub version: String,
    /// Value of the `:name` section
    pub name: String,
    /// `:units` entries, e.g. `angle -> deg`
    pub units: BTreeMap<String, String>,
    /// `:documentation` lines joined with newlines
    pub documentation: String,
    /// `:root` attributes, each an ordered token list (`order`, `axis`,
    /// `position`, `orientation`)
    pub root: BTreeMap<String, Vec<String>>,
    /// Bone definitions keyed by bone name
    pub bones: BTreeMap<String, BoneDefinition>,
    /// Parent name to ordered child names; [`ROOT`] is the synthetic parent
    pub hierarchy: BTreeMap<String, Vec<String>>,
}

impl Skeleton {
    /// Look up a bone by name
    pub fn bone(&self, name: &str) -> Option<&BoneDefinition> {
        self.bones.get(name)
    }

    /// Ordered children of `name`, empty if it has none
    pub fn children(&self, name: &str) -> &[String] {
        self.hierarchy.get(name).map_or(&[], Vec::as_slice)
    }

    /// Ordered children of the synthetic root
    pub fn root_children(&self) -> &[String] {
        self.children(ROOT)
    }

    /// Declared `root position`, or the origin if absent
    pub fn root_position(&self) -> DVec3 {
        self.root_vector("position")
    }

    /// Declared `root orientation` in degrees, or zero if absent
    pub fn root_orientation(&self) -> DVec3 {
        self.root_vector("orientation")
    }

    /// Root channel names in the order the motion file supplies them
    pub fn root_order(&self) -> &[String] {
        self.root.get("order").map_or(&[], Vec::as_slice)
    }

    /// Number of bone definitions
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    /// Total number of motion channels declared across all bones
    pub fn dof_count(&self) -> usize {
        self.bones.values().map(|bone| bone.dof.len()).sum()
    }

    /// Value of a `:units` entry
    pub fn unit(&self, name: &str) -> Option<&str> {
        self.units.get(name).map(String::as_str)
    }

    // The parser rejects bad tokens here; a hand-built skeleton can still
    // carry them, so those read as 0.
    fn root_vector(&self, key: &str) -> DVec3 {
        let mut values = [0.0; 3];
        if let Some(tokens) = self.root.get(key) {
            for (slot, token) in values.iter_mut().zip(tokens) {
                match parse_float(token, key, 0) {
                    Ok(value) => *slot = value,
                    Err(_) => debug!("root {key}: reading '{token}' as 0"),
                }
            }
        }
        DVec3::from_array(values)
    }
}

/// One `begin`/`end` record from the `:bonedata` section
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneDefinition {
    /// Numeric id, if the record declared one
    pub id: Option<i64>,
    /// Bone name, also its key in [`Skeleton::bones`]
    pub name: String,
    /// Bind-pose direction from the parent joint towards this bone's end
    pub direction: DVec3,
    /// Segment length
    pub length: f64,
    /// Bind-pose local axis, if declared
    pub axis: Option<BoneAxis>,
    /// Ordered motion channel names (`rx`, `ry`, `rz`, ...)
    pub dof: Vec<String>,
    /// Per-channel limits, in `dof` order
    pub limits: Vec<Limit>,
}

impl BoneDefinition {
    /// A bone with no direction, length, axis or channels
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            direction: DVec3::ZERO,
            length: 0.0,
            axis: None,
            dof: Vec::new(),
            limits: Vec::new(),
        }
    }

    /// Interpret each `dof` entry; unknown names map to `None`
    pub fn channels(&self) -> impl Iterator<Item = Option<Channel>> + '_ {
        self.dof.iter().map(|name| Channel::parse(name))
    }
}

/// The `axis` field of a bone: three angles in degrees and a composition order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneAxis {
    /// Rotation about x, y and z in degrees
    pub angles: DVec3,
    /// Order in which the elementary rotations are composed
    pub order: AxisOrder,
}

impl BoneAxis {
    /// The bind-pose axis matrix `C`
    pub fn matrix(&self) -> DMat3 {
        self.order.compose(self.angles)
    }
}

/// One `(min max)` pair from a `limits` field
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limit {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Limit {
    /// Whether `value` falls inside the closed range
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}
