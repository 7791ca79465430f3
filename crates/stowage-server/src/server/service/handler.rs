//! Request handlers.
//!
//! Generation endpoints delegate to [`LocationGenerator`]; the catalog
//! endpoints talk to its store directly. Every handler is generic over the
//! store so the same router runs against memory or Postgres.
//!
//! [`LocationGenerator`]: stowage::LocationGenerator

use crate::server::{error::ApiError, service::LocationService};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use stowage::{
    GenerationOutcome, GenerationPreview, GenerationScheme, LocationId, LocationStore,
    LocationType, NewStorageLocation, StorageLocation, TimeSource,
};

type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Body of `POST /api/storage-locations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocation {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: LocationType,
    #[serde(default)]
    pub is_single_part_only: bool,
    #[serde(default)]
    pub parent_location_id: Option<LocationId>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Body of `PUT /api/storage-locations/{id}`. Absent fields are left
/// unchanged. An explicit `null` clears `description` or
/// `parentLocationId`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocation {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub is_single_part_only: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub parent_location_id: Option<Option<LocationId>>,
    pub metadata: Option<BTreeMap<String, String>>,
}

/// Wraps any value that is present, `null` included, so it can be told
/// apart from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub async fn preview<S>(
    State(service): State<LocationService<S>>,
    body: JsonBody<GenerationScheme>,
) -> Result<Json<GenerationPreview>, ApiError>
where
    S: LocationStore + 'static,
{
    let Json(scheme) = body?;
    Ok(Json(service.generator().preview(&scheme)?))
}

pub async fn generate<S>(
    State(service): State<LocationService<S>>,
    body: JsonBody<GenerationScheme>,
) -> Result<(StatusCode, Json<GenerationOutcome>), ApiError>
where
    S: LocationStore + 'static,
{
    let Json(scheme) = body?;
    let result = service.generator().generate(&scheme).await;
    let outcome = GenerationOutcome::from(&result);
    result?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub async fn list_locations<S>(
    State(service): State<LocationService<S>>,
) -> Result<Json<Vec<StorageLocation>>, ApiError>
where
    S: LocationStore + 'static,
{
    Ok(Json(service.generator().store().list().await?))
}

pub async fn get_location<S>(
    State(service): State<LocationService<S>>,
    Path(id): Path<LocationId>,
) -> Result<Json<StorageLocation>, ApiError>
where
    S: LocationStore + 'static,
{
    service
        .generator()
        .store()
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(id))
}

pub async fn create_location<S>(
    State(service): State<LocationService<S>>,
    body: JsonBody<CreateLocation>,
) -> Result<(StatusCode, Json<StorageLocation>), ApiError>
where
    S: LocationStore + 'static,
{
    let Json(request) = body?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest(
            "location name must not be empty".to_string(),
        ));
    }

    let generator = service.generator();
    let mut location = NewStorageLocation::new(name, generator.clock().now());
    location.description = request.description;
    location.kind = request.kind;
    location.is_single_part_only = request.is_single_part_only;
    location.parent_location_id = request.parent_location_id;
    location.metadata = request.metadata;

    let created = generator.store().insert_one(location).await?;
    tracing::info!(id = %created.id, name = %created.name, "Created storage location");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_location<S>(
    State(service): State<LocationService<S>>,
    Path(id): Path<LocationId>,
    body: JsonBody<UpdateLocation>,
) -> Result<Json<StorageLocation>, ApiError>
where
    S: LocationStore + 'static,
{
    let Json(changes) = body?;
    let generator = service.generator();
    let mut location = generator
        .store()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found(id))?;

    if let Some(name) = changes.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest(
                "location name must not be empty".to_string(),
            ));
        }
        location.name = name.to_string();
    }
    if let Some(description) = changes.description {
        location.description = description;
    }
    if let Some(single_part_only) = changes.is_single_part_only {
        location.is_single_part_only = single_part_only;
    }
    if let Some(parent) = changes.parent_location_id {
        location.parent_location_id = parent;
    }
    if let Some(metadata) = changes.metadata {
        location.metadata = metadata;
    }
    location.last_modified = generator.clock().now();

    Ok(Json(generator.store().update(location).await?))
}

pub async fn healthz() -> &'static str {
    "ok"
}
