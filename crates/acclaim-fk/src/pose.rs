//! World-space bone segments produced by an evaluation

use std::collections::BTreeMap;

use acclaim_data::DVec3;

/// A bone's world-space start and end points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Where the bone attaches to its parent
    #[cfg_attr(feature = "serde", serde(with = "point"))]
    pub start: DVec3,
    /// Where the bone's children attach
    #[cfg_attr(feature = "serde", serde(with = "point"))]
    pub end: DVec3,
}

impl Segment {
    /// Distance between start and end
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Segments of every posed bone, keyed by bone name
///
/// A pose is built fresh for each evaluation and not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Pose {
    segments: BTreeMap<String, Segment>,
}

impl Pose {
    /// Segment of `bone`, if it was posed
    pub fn get(&self, bone: &str) -> Option<&Segment> {
        self.segments.get(bone)
    }

    /// Whether `bone` was posed
    pub fn contains(&self, bone: &str) -> bool {
        self.segments.contains_key(bone)
    }

    /// Number of posed bones
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether nothing was posed
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `(bone, segment)` pairs ordered by bone name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Segment)> {
        self.segments
            .iter()
            .map(|(name, segment)| (name.as_str(), segment))
    }

    /// Axis-aligned bounds of every segment endpoint
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        self.segments
            .values()
            .flat_map(|segment| [segment.start, segment.end])
            .fold(None, |bounds, point| match bounds {
                None => Some((point, point)),
                Some((min, max)) => Some((min.min(point), max.max(point))),
            })
    }

    pub(crate) fn insert(&mut self, bone: &str, segment: Segment) {
        self.segments.insert(bone.to_string(), segment);
    }
}

/// Serialize a point as `{x, y, z}`
#[cfg(feature = "serde")]
mod point {
    use acclaim_data::DVec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Point {
        x: f64,
        y: f64,
        z: f64,
    }

    pub fn serialize<S: Serializer>(value: &DVec3, serializer: S) -> Result<S::Ok, S::Error> {
        Point {
            x: value.x,
            y: value.y,
            z: value.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DVec3, D::Error> {
        let point = Point::deserialize(deserializer)?;
        Ok(DVec3::new(point.x, point.y, point.z))
    }
}
