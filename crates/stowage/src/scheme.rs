//! # Generation requests
//!
//! A [`GenerationScheme`] is the immutable, declarative description of one
//! batch of storage locations: a prefix, a [`LocationType`] deciding how many
//! axes are active, and up to three [`DimensionSpec`]s.
//!
//! | Type         | Axes used            | Example name |
//! |--------------|----------------------|--------------|
//! | `Single`     | none                 | `shelf`      |
//! | `Row`        | `dim1`               | `box-a`      |
//! | `Grid`       | `dim1`, `dim2`       | `1-A`        |
//! | `ThreeDGrid` | `dim1`, `dim2`, `dim3` | `A-1-03`   |

use crate::{Axis, Error};
use core::{fmt, str::FromStr};

/// The layout of a generation scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "&'static str"))]
pub enum LocationType {
    /// One location named exactly by the prefix.
    #[default]
    Single,
    /// A one-dimensional run of locations.
    Row,
    /// A two-dimensional matrix of locations.
    Grid,
    /// Stacked layers of two-dimensional matrices.
    ThreeDGrid,
}

impl LocationType {
    /// Number of dimension specs this layout consumes.
    pub const fn dimensions(self) -> usize {
        match self {
            Self::Single => 0,
            Self::Row => 1,
            Self::Grid => 2,
            Self::ThreeDGrid => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Row => "row",
            Self::Grid => "grid",
            Self::ThreeDGrid => "3d-grid",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "row" => Ok(Self::Row),
            "grid" => Ok(Self::Grid),
            "3d-grid" | "three-d-grid" | "threedgrid" => Ok(Self::ThreeDGrid),
            _ => Err(Error::UnsupportedType {
                kind: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for LocationType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LocationType> for &'static str {
    fn from(kind: LocationType) -> Self {
        kind.as_str()
    }
}

/// One axis of enumeration.
///
/// Bounds are optional so that a partially filled request can still be
/// previewed. A spec missing either bound resolves to no tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "mode", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum DimensionSpec {
    /// An inclusive `A..=Z` letter range.
    Letters {
        start: Option<char>,
        end: Option<char>,
        /// Force uppercase tokens regardless of the start letter's case.
        #[cfg_attr(feature = "serde", serde(default))]
        capitalize: bool,
    },
    /// An inclusive, non-negative integer range.
    Numbers {
        start: Option<i64>,
        end: Option<i64>,
        /// Left-pad tokens with `0` to the width of the larger bound.
        #[cfg_attr(feature = "serde", serde(default))]
        pad_with_zeros: bool,
    },
}

impl DimensionSpec {
    pub const fn letters(start: char, end: char) -> Self {
        Self::Letters {
            start: Some(start),
            end: Some(end),
            capitalize: false,
        }
    }

    pub const fn numbers(start: i64, end: i64) -> Self {
        Self::Numbers {
            start: Some(start),
            end: Some(end),
            pad_with_zeros: false,
        }
    }

    /// Sets `capitalize`. Has no effect on a number range.
    #[must_use]
    pub const fn capitalized(mut self) -> Self {
        if let Self::Letters { capitalize, .. } = &mut self {
            *capitalize = true;
        }
        self
    }

    /// Sets `pad_with_zeros`. Has no effect on a letter range.
    #[must_use]
    pub const fn zero_padded(mut self) -> Self {
        if let Self::Numbers { pad_with_zeros, .. } = &mut self {
            *pad_with_zeros = true;
        }
        self
    }

    pub const fn uses_letters(&self) -> bool {
        matches!(self, Self::Letters { .. })
    }
}

/// A declarative request describing one batch of location names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenerationScheme {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: LocationType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefix: String,
    /// Copied verbatim onto every generated location.
    #[cfg_attr(feature = "serde", serde(default))]
    pub single_part_only: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dim1: Option<DimensionSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dim2: Option<DimensionSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dim3: Option<DimensionSpec>,
    /// Placed between the `dim1` and `dim2` tokens.
    #[cfg_attr(feature = "serde", serde(default))]
    pub separator1: String,
    /// Placed between the `dim2` and `dim3` tokens.
    #[cfg_attr(feature = "serde", serde(default))]
    pub separator2: String,
}

impl GenerationScheme {
    pub fn single(prefix: impl Into<String>) -> Self {
        Self {
            kind: LocationType::Single,
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn row(prefix: impl Into<String>, dim1: DimensionSpec) -> Self {
        Self {
            kind: LocationType::Row,
            prefix: prefix.into(),
            dim1: Some(dim1),
            ..Self::default()
        }
    }

    pub fn grid(prefix: impl Into<String>, dim1: DimensionSpec, dim2: DimensionSpec) -> Self {
        Self {
            kind: LocationType::Grid,
            prefix: prefix.into(),
            dim1: Some(dim1),
            dim2: Some(dim2),
            ..Self::default()
        }
    }

    pub fn three_d_grid(
        prefix: impl Into<String>,
        dim1: DimensionSpec,
        dim2: DimensionSpec,
        dim3: DimensionSpec,
    ) -> Self {
        Self {
            kind: LocationType::ThreeDGrid,
            prefix: prefix.into(),
            dim1: Some(dim1),
            dim2: Some(dim2),
            dim3: Some(dim3),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_separators(
        mut self,
        separator1: impl Into<String>,
        separator2: impl Into<String>,
    ) -> Self {
        self.separator1 = separator1.into();
        self.separator2 = separator2.into();
        self
    }

    #[must_use]
    pub const fn single_part_only(mut self, single_part_only: bool) -> Self {
        self.single_part_only = single_part_only;
        self
    }

    /// The spec feeding `axis`, if one was supplied.
    pub const fn dimension(&self, axis: Axis) -> Option<&DimensionSpec> {
        match axis {
            Axis::Row => self.dim1.as_ref(),
            Axis::Column => self.dim2.as_ref(),
            Axis::Depth => self.dim3.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types_case_insensitively() {
        assert_eq!("Row".parse::<LocationType>(), Ok(LocationType::Row));
        assert_eq!(" grid ".parse::<LocationType>(), Ok(LocationType::Grid));
        assert_eq!(
            "ThreeDGrid".parse::<LocationType>(),
            Ok(LocationType::ThreeDGrid)
        );
        assert_eq!(
            "3d-grid".parse::<LocationType>(),
            Ok(LocationType::ThreeDGrid)
        );
    }

    #[test]
    fn rejects_unknown_type() {
        let err = "hexagon".parse::<LocationType>().unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedType {
                kind: "hexagon".to_string()
            }
        );
        assert!(err.to_string().contains("unsupported location type"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in [
            LocationType::Single,
            LocationType::Row,
            LocationType::Grid,
            LocationType::ThreeDGrid,
        ] {
            assert_eq!(kind.to_string().parse::<LocationType>(), Ok(kind));
        }
    }

    #[test]
    fn builder_flags_only_touch_their_mode() {
        assert_eq!(
            DimensionSpec::numbers(1, 9).capitalized(),
            DimensionSpec::numbers(1, 9)
        );
        assert_eq!(
            DimensionSpec::letters('a', 'c').zero_padded(),
            DimensionSpec::letters('a', 'c')
        );
        assert!(matches!(
            DimensionSpec::letters('a', 'c').capitalized(),
            DimensionSpec::Letters {
                capitalize: true,
                ..
            }
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_camel_case_request() {
        let scheme: GenerationScheme = serde_json::from_str(
            r#"{
                "type": "Grid",
                "prefix": "bin-",
                "singlePartOnly": true,
                "dim1": { "mode": "numbers", "start": 1, "end": 2, "padWithZeros": true },
                "dim2": { "mode": "letters", "start": "a", "end": "b" },
                "separator1": "-"
            }"#,
        )
        .unwrap();

        assert_eq!(
            scheme,
            GenerationScheme::grid(
                "bin-",
                DimensionSpec::numbers(1, 2).zero_padded(),
                DimensionSpec::letters('a', 'b'),
            )
            .with_separators("-", "")
            .single_part_only(true)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializing_unknown_type_fails() {
        let err = serde_json::from_str::<GenerationScheme>(r#"{ "type": "Cube" }"#).unwrap_err();
        assert!(err.to_string().contains("unsupported location type"));
    }
}
