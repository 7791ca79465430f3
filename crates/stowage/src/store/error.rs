use crate::LocationId;

/// Errors reported by a [`LocationStore`](crate::LocationStore).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The write would break name uniqueness.
    ///
    /// `names` is empty when the backend could not say which name clashed.
    #[error("{}", conflict_message(.names))]
    Conflict { names: Vec<String> },

    #[error("storage location {id} not found")]
    NotFound { id: LocationId },

    /// Connectivity, constraint or serialization failure in the backend.
    #[error("{message}")]
    Backend { message: String },
}

fn conflict_message(names: &[String]) -> String {
    if names.is_empty() {
        "a location name is already taken".to_string()
    } else {
        format!("location name(s) already taken: {}", names.join(", "))
    }
}
