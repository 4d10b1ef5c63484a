//! Data structures produced by the AMC parser

use std::collections::BTreeMap;

/// Frame number as written in the file
pub type FrameNumber = i64;

/// Channel values for one frame, keyed by bone name
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Frame {
    channels: BTreeMap<String, Vec<f64>>,
}

impl Frame {
    /// Empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Values recorded for `bone`, if any
    pub fn channel(&self, bone: &str) -> Option<&[f64]> {
        self.channels.get(bone).map(Vec::as_slice)
    }

    /// Record the values for `bone`, replacing earlier values
    pub fn insert(&mut self, bone: impl Into<String>, values: Vec<f64>) -> Option<Vec<f64>> {
        self.channels.insert(bone.into(), values)
    }

    /// All `(bone, values)` pairs ordered by bone name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.channels
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of bones with recorded values
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no bone has values
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<f64>)> for Frame {
    fn from_iter<I: IntoIterator<Item = (S, Vec<f64>)>>(iter: I) -> Self {
        Self {
            channels: iter
                .into_iter()
                .map(|(name, values)| (name.into(), values))
                .collect(),
        }
    }
}

/// A parsed AMC file
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Motion {
    /// `:`-prefixed header keywords such as `FULLY-SPECIFIED` and `DEGREES`
    pub keywords: Vec<String>,
    /// Frames ordered by frame number
    pub frames: BTreeMap<FrameNumber, Frame>,
}

impl Motion {
    /// Look up a frame
    pub fn frame(&self, number: FrameNumber) -> Option<&Frame> {
        self.frames.get(&number)
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Lowest and highest frame numbers
    pub fn frame_range(&self) -> Option<(FrameNumber, FrameNumber)> {
        let first = self.frames.keys().next()?;
        let last = self.frames.keys().next_back()?;
        Some((*first, *last))
    }

    /// Whether a header keyword is present (case-insensitive)
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords
            .iter()
            .any(|present| present.eq_ignore_ascii_case(keyword))
    }

    /// Frames in ascending frame-number order
    pub fn iter(&self) -> impl Iterator<Item = (FrameNumber, &Frame)> {
        self.frames.iter().map(|(number, frame)| (*number, frame))
    }
}
