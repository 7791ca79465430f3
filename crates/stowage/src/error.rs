use crate::{Axis, StoreError};

/// A result type defaulting to the crate [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors the generation engine can report.
///
/// Every failure is returned as a value. A failed [`generate`] never leaves
/// the store partially mutated.
///
/// [`generate`]: crate::LocationGenerator::generate
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested scheme type is not one of the supported layouts.
    #[error("unsupported location type: {kind:?}")]
    UnsupportedType { kind: String },

    /// A dimension used by the scheme resolved to no tokens.
    ///
    /// Only reported under [`Strictness::Strict`](crate::Strictness::Strict).
    #[error("{axis} does not resolve to any values")]
    MalformedDimension { axis: Axis },

    /// The scheme expands past the configured hard ceiling.
    #[error("scheme would generate {count} locations, more than the allowed maximum of {max}")]
    TooManyLocations { count: u128, max: usize },

    /// Generated names that already exist, or that the scheme produces more
    /// than once.
    #[error("{}", collision_message(.names))]
    Collision { names: Vec<String> },

    /// The persistence layer failed for a reason other than a name conflict.
    #[error("persistence error: {0}")]
    Persistence(StoreError),
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            // A uniqueness violation at insert time lands in the same bucket as
            // the pre-check.
            StoreError::Conflict { mut names } => {
                names.sort_unstable();
                names.dedup();
                Self::Collision { names }
            }
            other => Self::Persistence(other),
        }
    }
}

fn collision_message(names: &[String]) -> String {
    if names.is_empty() {
        "a generated location name already exists".to_string()
    } else {
        format!(
            "{} location name(s) already exist: {}",
            names.len(),
            names.join(", ")
        )
    }
}
