//! # Generation orchestration
//!
//! [`LocationGenerator`] runs the two-phase protocol:
//!
//! - [`preview`](LocationGenerator::preview) composes the scheme, lays out
//!   the grid view and flags oversized requests. It never reads or writes
//!   persisted state, so it can be called any number of times.
//! - [`generate`](LocationGenerator::generate) composes the same names,
//!   rejects any that already exist, and commits the rest as one atomic
//!   batch.
//!
//! Nothing is stored between the two calls. A caller confirms a preview by
//! calling `generate` with the same scheme.

mod config;

pub use config::*;

use crate::{
    AxisOrder, Error, GenerationPreview, GenerationScheme, LocationStore, NewStorageLocation,
    Result, StorageLocation, SystemClock, TimeSource, compose, location_count, resolved_len,
};
use std::collections::{BTreeSet, HashSet};

/// The outcome of a successful commit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenerationReport {
    pub created: usize,
    pub locations: Vec<StorageLocation>,
}

/// A transport-friendly success flag with an optional reason.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenerationOutcome {
    pub success: bool,
    pub message: Option<String>,
    pub created: usize,
    /// Names that blocked the commit, if it failed on a collision.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub collisions: Vec<String>,
}

impl From<&Result<GenerationReport>> for GenerationOutcome {
    fn from(result: &Result<GenerationReport>) -> Self {
        match result {
            Ok(report) => Self {
                success: true,
                message: Some(format!(
                    "Generated {} storage location(s)",
                    report.created
                )),
                created: report.created,
                collisions: Vec::new(),
            },
            Err(err) => Self {
                success: false,
                message: Some(err.to_string()),
                created: 0,
                collisions: match err {
                    Error::Collision { names } => names.clone(),
                    _ => Vec::new(),
                },
            },
        }
    }
}

impl From<Result<GenerationReport>> for GenerationOutcome {
    fn from(result: Result<GenerationReport>) -> Self {
        Self::from(&result)
    }
}

/// Expands generation schemes and commits them to a [`LocationStore`].
///
/// The generator itself holds no mutable state; it is safe to share behind
/// an `Arc` and call concurrently. Uniqueness under concurrent commits is
/// enforced by the store's gated insert.
///
/// # Example
///
/// ```
/// use stowage::{DimensionSpec, GenerationScheme, LocationGenerator, MemoryLocationStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let generator = LocationGenerator::new(MemoryLocationStore::new());
/// let scheme = GenerationScheme::row("box-", DimensionSpec::letters('a', 'd'));
///
/// let preview = generator.preview(&scheme).unwrap();
/// assert_eq!(preview.names, ["box-a", "box-b", "box-c", "box-d"]);
///
/// let report = generator.generate(&scheme).await.unwrap();
/// assert_eq!(report.created, 4);
/// # }
/// ```
#[derive(Debug)]
pub struct LocationGenerator<S, T = SystemClock> {
    store: S,
    clock: T,
    config: GeneratorConfig,
}

impl<S> LocationGenerator<S>
where
    S: LocationStore,
{
    /// A generator with the default config and the system clock.
    pub fn new(store: S) -> Self {
        Self::with_config(store, SystemClock, GeneratorConfig::default())
    }
}

impl<S, T> LocationGenerator<S, T>
where
    S: LocationStore,
    T: TimeSource,
{
    pub const fn with_config(store: S, clock: T, config: GeneratorConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn clock(&self) -> &T {
        &self.clock
    }

    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds a preview of `scheme` without touching the store.
    ///
    /// # Errors
    ///
    /// - [`Error::TooManyLocations`] when the scheme expands past
    ///   [`GeneratorConfig::effective_max_locations`]. Nothing is enumerated.
    /// - [`Error::MalformedDimension`] under [`Strictness::Strict`].
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(kind = %scheme.kind, prefix = %scheme.prefix)))]
    pub fn preview(&self, scheme: &GenerationScheme) -> Result<GenerationPreview> {
        self.check(scheme)?;
        Ok(GenerationPreview::build(
            scheme,
            self.config.recommended_limit,
        ))
    }

    /// Composes `scheme` and commits every resulting name, or nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::Collision`] if any name already exists or the scheme
    ///   produces it twice. The store is left unchanged.
    /// - [`Error::Persistence`] if the store fails for another reason.
    /// - The guard errors documented on [`Self::preview`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(kind = %scheme.kind, prefix = %scheme.prefix)))]
    pub async fn generate(&self, scheme: &GenerationScheme) -> Result<GenerationReport> {
        self.check(scheme)?;
        let names = compose(scheme);
        if names.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::info!("Scheme resolved to no locations, nothing to generate");
            return Ok(GenerationReport {
                created: 0,
                locations: Vec::new(),
            });
        }

        let repeated = repeated_names(&names);
        if !repeated.is_empty() {
            return Err(collision(repeated));
        }

        let existing = self.store.find_existing(&names).await?;
        if !existing.is_empty() {
            return Err(collision(existing));
        }

        let now = self.clock.now();
        let batch = names
            .into_iter()
            .map(|name| {
                NewStorageLocation::generated(name, scheme.kind, scheme.single_part_only, now)
            })
            .collect();

        let locations = match self.store.insert_all(batch).await {
            Ok(locations) => locations,
            Err(err) => {
                let err = Error::from(err);
                #[cfg(feature = "tracing")]
                if let Error::Collision { names } = &err {
                    tracing::warn!(names = %names.join(", "), "Location generation lost an insert race");
                } else {
                    tracing::error!("Location generation failed: {err}");
                }
                return Err(err);
            }
        };

        #[cfg(feature = "tracing")]
        tracing::info!("Successfully generated {} storage locations", locations.len());

        Ok(GenerationReport {
            created: locations.len(),
            locations,
        })
    }

    fn check(&self, scheme: &GenerationScheme) -> Result<()> {
        if self.config.strictness == Strictness::Strict {
            for &axis in AxisOrder::for_type(scheme.kind).axes() {
                if scheme.dimension(axis).map_or(0, resolved_len) == 0 {
                    return Err(Error::MalformedDimension { axis });
                }
            }
        }

        let max = self.config.effective_max_locations();
        let count = location_count(scheme);
        if count > max as u128 {
            #[cfg(feature = "tracing")]
            tracing::warn!(count = %count, max, "Rejecting oversized generation scheme");
            return Err(Error::TooManyLocations { count, max });
        }
        Ok(())
    }
}

fn collision(names: impl IntoIterator<Item = String>) -> Error {
    let names: Vec<String> = names.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
    #[cfg(feature = "tracing")]
    tracing::warn!("Location generation failed - existing names: {}", names.join(", "));
    Error::Collision { names }
}

/// Names that occur more than once in `names`.
fn repeated_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .filter(|name| !seen.insert(name.as_str()))
        .cloned()
        .collect()
}
