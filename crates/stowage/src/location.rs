use crate::LocationType;
use chrono::{DateTime, SecondsFormat, Utc};
use core::fmt;
use std::collections::BTreeMap;

/// Metadata key naming the component that created a location.
pub const GENERATED_BY_KEY: &str = "GeneratedBy";
/// Metadata key holding the RFC 3339 generation timestamp.
pub const GENERATED_ON_KEY: &str = "GeneratedOn";
/// Value stored under [`GENERATED_BY_KEY`] for generated locations.
pub const GENERATOR_NAME: &str = "LocationGenerator";

/// Identifier assigned by the persistence layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LocationId(pub i64);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted storage location. Names are unique across the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StorageLocation {
    pub id: LocationId,
    pub name: String,
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: LocationType,
    pub is_single_part_only: bool,
    /// Enclosing location, for nested layouts. The generator never sets it.
    pub parent_location_id: Option<LocationId>,
    /// Parts currently stored here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stored_part_ids: Vec<i64>,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: BTreeMap<String, String>,
}

/// A location that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NewStorageLocation {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
    pub kind: LocationType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_single_part_only: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_location_id: Option<LocationId>,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: BTreeMap<String, String>,
}

impl NewStorageLocation {
    /// A bare location created at `now`.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: LocationType::Single,
            is_single_part_only: false,
            parent_location_id: None,
            created: now,
            last_modified: now,
            metadata: BTreeMap::new(),
        }
    }

    /// A location produced by the generator, stamped with provenance
    /// metadata.
    pub fn generated(
        name: impl Into<String>,
        kind: LocationType,
        single_part_only: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let mut location = Self::new(name, now);
        location.kind = kind;
        location.is_single_part_only = single_part_only;
        location
            .metadata
            .insert(GENERATED_BY_KEY.to_string(), GENERATOR_NAME.to_string());
        location.metadata.insert(
            GENERATED_ON_KEY.to_string(),
            now.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        );
        location
    }

    /// Attaches the id assigned by the store.
    pub fn into_location(self, id: LocationId) -> StorageLocation {
        StorageLocation {
            id,
            name: self.name,
            description: self.description,
            kind: self.kind,
            is_single_part_only: self.is_single_part_only,
            parent_location_id: self.parent_location_id,
            stored_part_ids: Vec::new(),
            created: self.created,
            last_modified: self.last_modified,
            metadata: self.metadata,
        }
    }
}
