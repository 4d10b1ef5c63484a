//! Axis vocabulary and elementary rotations
//!
//! Angles in both Acclaim formats are written in degrees and converted to
//! radians at the point a rotation matrix is built. All rotations are
//! right-handed:
//!
//! ```text
//! Rx(θ) = [[1, 0, 0], [0, cos θ, -sin θ], [0, sin θ, cos θ]]
//! Ry(θ) = [[cos θ, 0, sin θ], [0, 1, 0], [-sin θ, 0, cos θ]]
//! Rz(θ) = [[cos θ, -sin θ, 0], [sin θ, cos θ, 0], [0, 0, 1]]
//! ```

use std::fmt;
use std::str::FromStr;

use glam::{DMat3, DVec3};

use crate::error::ParseErrorKind;

/// One of the three coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// The x axis
    X,
    /// The y axis
    Y,
    /// The z axis
    Z,
}

impl Axis {
    /// Map a letter (either case) to an axis
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'x' => Some(Self::X),
            'y' => Some(Self::Y),
            'z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Component index of this axis (x = 0, y = 1, z = 2)
    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Lowercase letter for this axis
    pub fn letter(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
            Self::Z => 'z',
        }
    }

    /// Elementary rotation about this axis by `degrees`
    pub fn rotation(self, degrees: f64) -> DMat3 {
        let radians = degrees.to_radians();
        match self {
            Self::X => DMat3::from_rotation_x(radians),
            Self::Y => DMat3::from_rotation_y(radians),
            Self::Z => DMat3::from_rotation_z(radians),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Composition order for a bone's bind-pose axis rotation, e.g. `XYZ`
///
/// Holds one to three axes. Repeated letters are permitted; only the letters
/// and the length are constrained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct AxisOrder(Vec<Axis>);

impl AxisOrder {
    /// Axes in composition order
    pub fn axes(&self) -> &[Axis] {
        &self.0
    }

    /// Compose `R(order[0]) · R(order[1]) · ⋯`
    ///
    /// `angles` holds one angle per axis in x, y, z component order; each
    /// letter of the order picks the angle of its own axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use acclaim_data::{AxisOrder, DVec3};
    ///
    /// let order: AxisOrder = "XYZ".parse().unwrap();
    /// let matrix = order.compose(DVec3::new(0.0, 0.0, 90.0));
    /// let rotated = matrix * DVec3::X;
    /// assert!((rotated - DVec3::Y).length() < 1e-12);
    /// ```
    pub fn compose(&self, angles: DVec3) -> DMat3 {
        let angles = angles.to_array();
        self.0
            .iter()
            .fold(DMat3::IDENTITY, |matrix, axis| {
                matrix * axis.rotation(angles[axis.index()])
            })
    }
}

impl FromStr for AxisOrder {
    type Err = ParseErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseErrorKind::InvalidAxisOrder(s.to_string());

        if s.is_empty() || s.chars().count() > 3 {
            return Err(invalid());
        }

        s.chars()
            .map(|letter| Axis::from_letter(letter).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl TryFrom<String> for AxisOrder {
    type Error = ParseErrorKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AxisOrder> for String {
    fn from(order: AxisOrder) -> Self {
        order.to_string()
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in &self.0 {
            write!(f, "{}", axis.letter().to_ascii_uppercase())?;
        }
        Ok(())
    }
}

/// A motion channel named by a bone's `dof` list or the root `order`
///
/// Channel names are case-insensitive: `rx` and `RX` are the same channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Rotation about an axis, in degrees (`rx`, `ry`, `rz`)
    Rotation(Axis),
    /// Translation along an axis (`tx`, `ty`, `tz`)
    Translation(Axis),
    /// Bone length stretch (`l`)
    Length,
}

impl Channel {
    /// Interpret a channel name, returning `None` for unknown names
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let mut chars = lower.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some('l'), None, None) => Some(Self::Length),
            (Some('r'), Some(letter), None) => Axis::from_letter(letter).map(Self::Rotation),
            (Some('t'), Some(letter), None) => Axis::from_letter(letter).map(Self::Translation),
            _ => None,
        }
    }

    /// Axis of a rotation channel
    pub fn rotation_axis(self) -> Option<Axis> {
        match self {
            Self::Rotation(axis) => Some(axis),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-12, "{a:?} != {b:?}");
    }

    #[test]
    fn test_elementary_rotations_are_right_handed() {
        assert_close(Axis::X.rotation(90.0) * DVec3::Y, DVec3::Z);
        assert_close(Axis::Y.rotation(90.0) * DVec3::Z, DVec3::X);
        assert_close(Axis::Z.rotation(90.0) * DVec3::X, DVec3::Y);
    }

    #[test]
    fn test_rotation_matches_row_major_layout() {
        let (s, c) = 30.0_f64.to_radians().sin_cos();
        let rx = Axis::X.rotation(30.0);
        // glam stores columns; row 1 of Rx is [0, cos, -sin]
        assert_eq!(rx.row(1), DVec3::new(0.0, c, -s));
        assert_eq!(rx.row(2), DVec3::new(0.0, s, c));
    }

    #[test_case("XYZ" ; "upper")]
    #[test_case("zyx" ; "lower")]
    #[test_case("x" ; "single")]
    #[test_case("Yx" ; "mixed case")]
    #[test_case("xx" ; "repeated")]
    fn test_axis_order_accepts(order: &str) {
        assert!(order.parse::<AxisOrder>().is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("XYZX" ; "too long")]
    #[test_case("XYW" ; "bad letter")]
    #[test_case("1" ; "digit")]
    fn test_axis_order_rejects(order: &str) {
        assert_eq!(
            order.parse::<AxisOrder>(),
            Err(ParseErrorKind::InvalidAxisOrder(order.to_string()))
        );
    }

    #[test]
    fn test_axis_order_display_normalizes_case() {
        let order: AxisOrder = "zXy".parse().unwrap();
        assert_eq!(order.to_string(), "ZXY");
        assert_eq!(order.axes(), &[Axis::Z, Axis::X, Axis::Y]);
    }

    #[test]
    fn test_compose_picks_angle_by_letter() {
        let angles = DVec3::new(10.0, 20.0, 30.0);
        let order: AxisOrder = "ZYX".parse().unwrap();
        let expected = Axis::Z.rotation(30.0) * Axis::Y.rotation(20.0) * Axis::X.rotation(10.0);
        assert!(order.compose(angles).abs_diff_eq(expected, 1e-12));
    }

    #[test_case("rx", Some(Channel::Rotation(Axis::X)))]
    #[test_case("RZ", Some(Channel::Rotation(Axis::Z)))]
    #[test_case("TY", Some(Channel::Translation(Axis::Y)))]
    #[test_case("l", Some(Channel::Length))]
    #[test_case("rw", None)]
    #[test_case("rxy", None)]
    fn test_channel_parse(name: &str, expected: Option<Channel>) {
        assert_eq!(Channel::parse(name), expected);
    }

    proptest! {
        #[test]
        fn prop_composed_rotation_is_orthonormal(
            x in -360.0f64..360.0,
            y in -360.0f64..360.0,
            z in -360.0f64..360.0,
        ) {
            let order: AxisOrder = "XYZ".parse().unwrap();
            let matrix = order.compose(DVec3::new(x, y, z));
            prop_assert!((matrix * matrix.transpose()).abs_diff_eq(DMat3::IDENTITY, 1e-9));
            prop_assert!((matrix.determinant() - 1.0).abs() < 1e-9);
        }
    }
}
