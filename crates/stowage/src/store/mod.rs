//! # Persistence contract
//!
//! The generator talks to persisted locations only through
//! [`LocationStore`]. Implementations must hold the name column unique and
//! expose a *gated* bulk insert: either every row of a batch is written, or
//! none are and the blocking names are reported. That single call is the
//! authoritative uniqueness guard; the generator's read-only pre-check only
//! makes error messages better.
//!
//! ## Implementations
//!
//! - [`MemoryLocationStore`] - a mutex-guarded in-process catalog.
//! - `PgLocationStore` - Postgres via `sqlx` (feature `postgres`).

mod error;
mod memory;
#[cfg(feature = "postgres")]
mod postgres;

pub use error::*;
pub use memory::*;
#[cfg_attr(docsrs, doc(cfg(feature = "postgres")))]
#[cfg(feature = "postgres")]
pub use postgres::*;

use crate::{LocationId, NewStorageLocation, StorageLocation};
use core::future::Future;

/// Access to persisted storage locations.
///
/// All futures are `Send` so that the store can back a multi-threaded
/// server.
pub trait LocationStore: Send + Sync {
    /// Returns the subset of `names` that already exist.
    fn find_existing(
        &self,
        names: &[String],
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Atomically inserts every location in `batch`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Conflict`] listing the taken names if any name in the
    ///   batch already exists. Nothing from the batch is persisted.
    /// - [`StoreError::Backend`] for any other failure, also without partial
    ///   effects.
    fn insert_all(
        &self,
        batch: Vec<NewStorageLocation>,
    ) -> impl Future<Output = Result<Vec<StorageLocation>, StoreError>> + Send;

    /// Inserts one location under the same uniqueness rule as
    /// [`Self::insert_all`].
    fn insert_one(
        &self,
        location: NewStorageLocation,
    ) -> impl Future<Output = Result<StorageLocation, StoreError>> + Send {
        async move {
            self.insert_all(vec![location])
                .await?
                .pop()
                .ok_or_else(|| StoreError::Backend {
                    message: "insert returned no row".to_string(),
                })
        }
    }

    /// Every persisted location, ordered by id.
    fn list(&self) -> impl Future<Output = Result<Vec<StorageLocation>, StoreError>> + Send;

    fn get(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<StorageLocation>, StoreError>> + Send;

    /// Replaces the stored row with the same id.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no row has `location.id`.
    /// - [`StoreError::Conflict`] if the new name belongs to another row.
    fn update(
        &self,
        location: StorageLocation,
    ) -> impl Future<Output = Result<StorageLocation, StoreError>> + Send;
}
