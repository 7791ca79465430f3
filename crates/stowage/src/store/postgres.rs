use crate::{LocationId, LocationStore, LocationType, NewStorageLocation, StorageLocation, StoreError};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgDatabaseError, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::{BTreeMap, HashSet};

/// DDL for the location table. `name` carries the uniqueness constraint the
/// gated insert relies on.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS storage_locations (
    id                  BIGSERIAL PRIMARY KEY,
    name                TEXT NOT NULL,
    description         TEXT,
    kind                TEXT NOT NULL DEFAULT 'single',
    is_single_part_only BOOLEAN NOT NULL DEFAULT FALSE,
    parent_location_id  BIGINT REFERENCES storage_locations (id) ON DELETE SET NULL,
    created             TIMESTAMPTZ NOT NULL,
    last_modified       TIMESTAMPTZ NOT NULL,
    metadata            JSONB NOT NULL DEFAULT '{}'::jsonb,
    CONSTRAINT storage_locations_name_key UNIQUE (name)
)
"#;

const COLUMNS: &str = "id, name, description, kind, is_single_part_only, parent_location_id, \
                       created, last_modified, metadata";

/// A [`LocationStore`] backed by Postgres.
#[derive(Clone, Debug)]
pub struct PgLocationStore {
    pool: PgPool,
}

impl PgLocationStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the location table if it is missing.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl LocationStore for PgLocationStore {
    async fn find_existing(&self, names: &[String]) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT name FROM storage_locations WHERE name = ANY($1)")
            .bind(names)
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get("name").map_err(StoreError::from))
            .collect()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(batch = batch.len())))]
    async fn insert_all(
        &self,
        batch: Vec<NewStorageLocation>,
    ) -> Result<Vec<StorageLocation>, StoreError> {
        let columns = BatchColumns::from(batch.as_slice());
        let mut tx = self.pool.begin().await?;

        // Rows whose name is already taken are skipped instead of aborting,
        // so the missing ones can be reported by name.
        let rows = sqlx::query(&format!(
            r#"
            INSERT INTO storage_locations
                (name, description, kind, is_single_part_only, parent_location_id,
                 created, last_modified, metadata)
            SELECT * FROM UNNEST(
                $1::text[], $2::text[], $3::text[], $4::bool[], $5::int8[],
                $6::timestamptz[], $7::timestamptz[], $8::jsonb[]
            )
            ON CONFLICT (name) DO NOTHING
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&columns.names)
        .bind(&columns.descriptions)
        .bind(&columns.kinds)
        .bind(&columns.flags)
        .bind(&columns.parents)
        .bind(&columns.created)
        .bind(&columns.last_modified)
        .bind(&columns.metadata)
        .fetch_all(&mut *tx)
        .await?;

        if rows.len() < batch.len() {
            tx.rollback().await?;
            let inserted: HashSet<String> = rows
                .iter()
                .map(|row| row.try_get("name"))
                .collect::<Result<_, _>>()?;
            return Err(StoreError::Conflict {
                names: rejected_names(columns.names, &inserted),
            });
        }

        let locations = rows.iter().map(location_from_row).collect::<Result<_, _>>()?;
        tx.commit().await?;
        Ok(locations)
    }

    async fn list(&self) -> Result<Vec<StorageLocation>, StoreError> {
        sqlx::query(&format!("SELECT {COLUMNS} FROM storage_locations ORDER BY id"))
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(location_from_row)
            .collect()
    }

    async fn get(&self, id: LocationId) -> Result<Option<StorageLocation>, StoreError> {
        sqlx::query(&format!("SELECT {COLUMNS} FROM storage_locations WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(location_from_row)
            .transpose()
    }

    async fn update(&self, location: StorageLocation) -> Result<StorageLocation, StoreError> {
        let result = sqlx::query(&format!(
            r#"
            UPDATE storage_locations
            SET name = $2, description = $3, kind = $4, is_single_part_only = $5,
                parent_location_id = $6, last_modified = $7, metadata = $8
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(location.id.0)
        .bind(&location.name)
        .bind(&location.description)
        .bind(location.kind.as_str())
        .bind(location.is_single_part_only)
        .bind(location.parent_location_id.map(|id| id.0))
        .bind(location.last_modified)
        .bind(Json(&location.metadata))
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(Some(row)) => {
                let mut updated = location_from_row(&row)?;
                updated.stored_part_ids = location.stored_part_ids;
                Ok(updated)
            }
            Ok(None) => Err(StoreError::NotFound { id: location.id }),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(StoreError::Conflict {
                    names: vec![location.name],
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Column-major view of an insert batch, as `UNNEST` wants it.
struct BatchColumns {
    names: Vec<String>,
    descriptions: Vec<Option<String>>,
    kinds: Vec<&'static str>,
    flags: Vec<bool>,
    parents: Vec<Option<i64>>,
    created: Vec<DateTime<Utc>>,
    last_modified: Vec<DateTime<Utc>>,
    metadata: Vec<serde_json::Value>,
}

impl From<&[NewStorageLocation]> for BatchColumns {
    fn from(batch: &[NewStorageLocation]) -> Self {
        let mut columns = Self {
            names: Vec::with_capacity(batch.len()),
            descriptions: Vec::with_capacity(batch.len()),
            kinds: Vec::with_capacity(batch.len()),
            flags: Vec::with_capacity(batch.len()),
            parents: Vec::with_capacity(batch.len()),
            created: Vec::with_capacity(batch.len()),
            last_modified: Vec::with_capacity(batch.len()),
            metadata: Vec::with_capacity(batch.len()),
        };
        for location in batch {
            columns.names.push(location.name.clone());
            columns.descriptions.push(location.description.clone());
            columns.kinds.push(location.kind.as_str());
            columns.flags.push(location.is_single_part_only);
            columns.parents.push(location.parent_location_id.map(|id| id.0));
            columns.created.push(location.created);
            columns.last_modified.push(location.last_modified);
            columns.metadata.push(serde_json::Value::Object(
                location
                    .metadata
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            ));
        }
        columns
    }
}

/// Names from `attempted` that `ON CONFLICT DO NOTHING` skipped: those
/// already taken and any repeat of a name earlier in the batch. Sorted and
/// deduplicated.
fn rejected_names(attempted: Vec<String>, inserted: &HashSet<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names: Vec<String> = attempted
        .into_iter()
        .filter(|name| !inserted.contains(name) || !seen.insert(name.clone()))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Pulls the offending name out of a unique-violation detail such as
/// `Key (name)=(A1) already exists.`
fn name_from_detail(detail: &str) -> Option<String> {
    detail
        .strip_prefix("Key (name)=(")?
        .strip_suffix(") already exists.")
        .map(str::to_string)
}

fn location_from_row(row: &PgRow) -> Result<StorageLocation, StoreError> {
    let kind: String = row.try_get("kind")?;
    let Json(metadata): Json<BTreeMap<String, String>> = row.try_get("metadata")?;
    Ok(StorageLocation {
        id: LocationId(row.try_get("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        kind: kind
            .parse::<LocationType>()
            .map_err(|err| StoreError::Backend {
                message: err.to_string(),
            })?,
        is_single_part_only: row.try_get("is_single_part_only")?,
        parent_location_id: row
            .try_get::<Option<i64>, _>("parent_location_id")?
            .map(LocationId),
        stored_part_ids: Vec::new(),
        created: row.try_get("created")?,
        last_modified: row.try_get("last_modified")?,
        metadata,
    })
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict {
                names: db
                    .try_downcast_ref::<PgDatabaseError>()
                    .and_then(PgDatabaseError::detail)
                    .and_then(name_from_detail)
                    .into_iter()
                    .collect(),
            },
            other => Self::Backend {
                message: other.to_string(),
            },
        }
    }
}
