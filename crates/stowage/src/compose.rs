//! # Name composition
//!
//! Expands a [`GenerationScheme`] into the flat, ordered list of location
//! names. Iteration order is an explicit contract ([`AxisOrder`]) shared with
//! the grid view builder, so the flat list and the layered display always
//! line up.
//!
//! Name *formatting* is independent of iteration order and always reads
//! `prefix + dim1 + separator1 + dim2 + separator2 + dim3`.

use crate::{GenerationScheme, LocationType, resolve, resolved_len};
use core::fmt;

/// One axis of a multi-part identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Axis {
    /// Fed by `dim1`.
    Row,
    /// Fed by `dim2`.
    Column,
    /// Fed by `dim3`.
    Depth,
}

impl Axis {
    /// Position of this axis' token inside a formatted name.
    pub const fn slot(self) -> usize {
        match self {
            Self::Row => 0,
            Self::Column => 1,
            Self::Depth => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("dim1 (row)"),
            Self::Column => f.write_str("dim2 (column)"),
            Self::Depth => f.write_str("dim3 (depth)"),
        }
    }
}

/// The nesting order used to enumerate a scheme, outermost axis first.
///
/// | Type         | Order                   |
/// |--------------|-------------------------|
/// | `Single`     | (none)                  |
/// | `Row`        | row                     |
/// | `Grid`       | row, column             |
/// | `ThreeDGrid` | depth, row, column      |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisOrder(&'static [Axis]);

impl AxisOrder {
    pub const fn for_type(kind: LocationType) -> Self {
        match kind {
            LocationType::Single => Self(&[]),
            LocationType::Row => Self(&[Axis::Row]),
            LocationType::Grid => Self(&[Axis::Row, Axis::Column]),
            LocationType::ThreeDGrid => Self(&[Axis::Depth, Axis::Row, Axis::Column]),
        }
    }

    /// Axes from outermost to innermost loop.
    pub const fn axes(&self) -> &'static [Axis] {
        self.0
    }
}

/// Upper bound on the number of names [`compose`] (and tokens [`resolve`])
/// will ever materialize.
///
/// [`resolve`]: crate::resolve
pub const MAX_ENUMERATION: usize = 1_000_000;

/// Expands `scheme` into every location name it implies.
///
/// `Single` yields exactly `[prefix]`. The other layouts yield the cartesian
/// product of their resolved dimensions in [`AxisOrder`], and nothing at all
/// if any active dimension resolves to no tokens or the product exceeds
/// [`MAX_ENUMERATION`]. Callers that need to tell the two apart check
/// [`location_count`] first, as [`LocationGenerator`] does.
///
/// [`LocationGenerator`]: crate::LocationGenerator
///
/// # Example
///
/// ```
/// use stowage::{DimensionSpec, GenerationScheme, compose};
///
/// let scheme = GenerationScheme::grid("", DimensionSpec::numbers(1, 2), DimensionSpec::letters('A', 'B'))
///     .with_separators("-", "");
/// assert_eq!(compose(&scheme), ["1-A", "1-B", "2-A", "2-B"]);
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip_all, fields(kind = %scheme.kind)))]
pub fn compose(scheme: &GenerationScheme) -> Vec<String> {
    let axes = AxisOrder::for_type(scheme.kind).axes();
    if axes.is_empty() {
        return vec![scheme.prefix.clone()];
    }

    // sized before any dimension is resolved
    let count = location_count(scheme);
    if count == 0 {
        return Vec::new();
    }
    if count > MAX_ENUMERATION as u128 {
        #[cfg(feature = "tracing")]
        tracing::warn!(count = %count, max = MAX_ENUMERATION, "Refusing to enumerate oversized scheme");
        return Vec::new();
    }

    let tokens: Vec<Vec<String>> = axes
        .iter()
        .map(|&axis| scheme.dimension(axis).map(resolve).unwrap_or_default())
        .collect();
    if tokens.iter().any(Vec::is_empty) {
        return Vec::new();
    }

    let mut names = Vec::with_capacity(tokens.iter().map(Vec::len).product());
    // odometer over `tokens`, last axis spinning fastest
    let mut cursor = vec![0_usize; axes.len()];
    loop {
        let mut slots = [""; 3];
        for (i, &axis) in axes.iter().enumerate() {
            slots[axis.slot()] = tokens[i][cursor[i]].as_str();
        }
        names.push(format_name(scheme, slots));

        let mut level = axes.len();
        loop {
            if level == 0 {
                return names;
            }
            level -= 1;
            cursor[level] += 1;
            if cursor[level] < tokens[level].len() {
                break;
            }
            cursor[level] = 0;
        }
    }
}

/// Exact number of names [`compose`] would produce for `scheme`.
///
/// Computed from the resolved dimension sizes, so it is cheap even for
/// schemes that would expand to billions of names.
pub fn location_count(scheme: &GenerationScheme) -> u128 {
    AxisOrder::for_type(scheme.kind)
        .axes()
        .iter()
        .map(|&axis| scheme.dimension(axis).map_or(0, resolved_len))
        .fold(1_u128, |acc, len| acc.saturating_mul(u128::from(len)))
}

fn format_name(scheme: &GenerationScheme, [d1, d2, d3]: [&str; 3]) -> String {
    let mut name = String::with_capacity(
        scheme.prefix.len()
            + d1.len()
            + d2.len()
            + d3.len()
            + scheme.separator1.len()
            + scheme.separator2.len(),
    );
    name.push_str(&scheme.prefix);
    name.push_str(d1);
    if scheme.kind.dimensions() >= 2 {
        name.push_str(&scheme.separator1);
        name.push_str(d2);
    }
    if scheme.kind.dimensions() >= 3 {
        name.push_str(&scheme.separator2);
        name.push_str(d3);
    }
    name
}
