use crate::{MAX_ENUMERATION, RECOMMENDED_LIMIT};

/// How dimensions that resolve to no tokens are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Strictness {
    /// Malformed or absent dimensions silently shrink the generated set.
    #[default]
    Lenient,
    /// Every dimension the scheme type uses must resolve to at least one
    /// token, otherwise the request is rejected.
    Strict,
}

/// Tunables for a [`LocationGenerator`](crate::LocationGenerator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GeneratorConfig {
    /// Previews above this many names carry a warning.
    pub recommended_limit: usize,
    /// Hard ceiling on the number of names a single scheme may expand to.
    /// Checked before anything is enumerated. Values above
    /// [`MAX_ENUMERATION`] are treated as [`MAX_ENUMERATION`].
    pub max_locations: usize,
    pub strictness: Strictness,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            recommended_limit: RECOMMENDED_LIMIT,
            max_locations: MAX_ENUMERATION,
            strictness: Strictness::Lenient,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub const fn with_recommended_limit(mut self, limit: usize) -> Self {
        self.recommended_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_max_locations(mut self, max: usize) -> Self {
        self.max_locations = max;
        self
    }

    /// The ceiling actually enforced: `max_locations`, capped at
    /// [`MAX_ENUMERATION`].
    pub const fn effective_max_locations(&self) -> usize {
        if self.max_locations < MAX_ENUMERATION {
            self.max_locations
        } else {
            MAX_ENUMERATION
        }
    }

    #[must_use]
    pub const fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }
}
