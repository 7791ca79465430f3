//! # Dimension value resolution
//!
//! Turns one [`DimensionSpec`] into the ordered tokens it contributes to each
//! generated name.
//!
//! Resolution never fails. Missing or non-alphabetic bounds yield an empty
//! sequence, reversed bounds are swapped, and out-of-range values are clamped
//! (letters into `A..=Z`, numbers to `>= 0`).

use crate::{DimensionSpec, MAX_ENUMERATION};

/// Resolves `spec` into its ordered token sequence.
///
/// A range longer than [`MAX_ENUMERATION`] resolves to nothing;
/// [`resolved_len`] still reports its true length.
///
/// # Example
///
/// ```
/// use stowage::{DimensionSpec, resolve};
///
/// assert_eq!(resolve(&DimensionSpec::letters('c', 'a')), ["a", "b", "c"]);
/// assert_eq!(resolve(&DimensionSpec::numbers(8, 10).zero_padded()), ["08", "09", "10"]);
/// ```
pub fn resolve(spec: &DimensionSpec) -> Vec<String> {
    if resolved_len(spec) > MAX_ENUMERATION as u64 {
        return Vec::new();
    }
    match *spec {
        DimensionSpec::Letters {
            start,
            end,
            capitalize,
        } => LetterRange::new(start, end).map_or_else(Vec::new, |range| {
            let uppercase = capitalize || range.uppercase;
            (range.first..=range.last)
                .map(|c| {
                    if uppercase {
                        c.to_string()
                    } else {
                        c.to_ascii_lowercase().to_string()
                    }
                })
                .collect()
        }),
        DimensionSpec::Numbers {
            start,
            end,
            pad_with_zeros,
        } => NumberRange::new(start, end).map_or_else(Vec::new, |range| {
            let width = if pad_with_zeros {
                digit_count(range.last)
            } else {
                0
            };
            (range.first..=range.last)
                .map(|n| format!("{n:0width$}"))
                .collect()
        }),
    }
}

/// The number of tokens [`resolve`] yields for `spec`, without allocating.
pub fn resolved_len(spec: &DimensionSpec) -> u64 {
    match *spec {
        DimensionSpec::Letters { start, end, .. } => LetterRange::new(start, end)
            .map_or(0, |range| {
                (u64::from(range.last) + 1).saturating_sub(u64::from(range.first))
            }),
        DimensionSpec::Numbers { start, end, .. } => NumberRange::new(start, end)
            .map_or(0, |range| range.last.abs_diff(range.first) + 1),
    }
}

/// Normalized letter bounds, uppercase and clamped into `A..=Z`.
///
/// `first > last` is possible after clamping (non-ASCII letters) and means the
/// range is empty.
struct LetterRange {
    first: char,
    last: char,
    /// Case of the start letter as supplied. It governs every token, even
    /// when the bounds were swapped.
    uppercase: bool,
}

impl LetterRange {
    fn new(start: Option<char>, end: Option<char>) -> Option<Self> {
        let (start, end) = (start?, end?);
        let (mut first, mut last) = (to_upper(start), to_upper(end));
        if !first.is_alphabetic() || !last.is_alphabetic() {
            return None;
        }
        if last < first {
            core::mem::swap(&mut first, &mut last);
        }
        Some(Self {
            first: first.max('A'),
            last: last.min('Z'),
            uppercase: start.is_uppercase(),
        })
    }
}

/// Normalized number bounds, non-negative with `first <= last`.
struct NumberRange {
    first: i64,
    last: i64,
}

impl NumberRange {
    fn new(start: Option<i64>, end: Option<i64>) -> Option<Self> {
        let (start, end) = (start?.max(0), end?.max(0));
        Some(Self {
            first: start.min(end),
            last: start.max(end),
        })
    }
}

/// Single-character uppercase mapping. Letters whose uppercase form expands
/// to several characters (e.g. `ß`) keep their original form.
fn to_upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(upper), None) => upper,
        _ => c,
    }
}

fn digit_count(n: i64) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}
