use crate::{LocationId, LocationStore, NewStorageLocation, StorageLocation, StoreError};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// An in-process [`LocationStore`].
///
/// Every operation runs under a single [`Mutex`], so the conflict check and
/// the insert of a batch are one linearizable step. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MemoryLocationStore {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<LocationId, StorageLocation>,
    by_name: HashMap<String, LocationId>,
}

impl State {
    fn conflicts<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut taken = BTreeSet::new();
        for name in names {
            if self.by_name.contains_key(name) || !seen.insert(name) {
                taken.insert(name.to_string());
            }
        }
        taken.into_iter().collect()
    }

    fn insert(&mut self, location: NewStorageLocation) -> StorageLocation {
        self.last_id += 1;
        let id = LocationId(self.last_id);
        let row = location.into_location(id);
        self.by_name.insert(row.name.clone(), id);
        self.rows.insert(id, row.clone());
        row
    }
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().by_name.contains_key(name)
    }
}

impl LocationStore for MemoryLocationStore {
    async fn find_existing(&self, names: &[String]) -> Result<Vec<String>, StoreError> {
        let state = self.state.lock();
        Ok(names
            .iter()
            .filter(|name| state.by_name.contains_key(name.as_str()))
            .cloned()
            .collect())
    }

    async fn insert_all(
        &self,
        batch: Vec<NewStorageLocation>,
    ) -> Result<Vec<StorageLocation>, StoreError> {
        let mut state = self.state.lock();
        let taken = state.conflicts(batch.iter().map(|l| l.name.as_str()));
        if !taken.is_empty() {
            return Err(StoreError::Conflict { names: taken });
        }
        Ok(batch.into_iter().map(|l| state.insert(l)).collect())
    }

    async fn list(&self) -> Result<Vec<StorageLocation>, StoreError> {
        Ok(self.state.lock().rows.values().cloned().collect())
    }

    async fn get(&self, id: LocationId) -> Result<Option<StorageLocation>, StoreError> {
        Ok(self.state.lock().rows.get(&id).cloned())
    }

    async fn update(&self, location: StorageLocation) -> Result<StorageLocation, StoreError> {
        let mut state = self.state.lock();
        let previous = match state.rows.get(&location.id) {
            Some(row) => row.name.clone(),
            None => return Err(StoreError::NotFound { id: location.id }),
        };
        if previous != location.name {
            if state.by_name.contains_key(&location.name) {
                return Err(StoreError::Conflict {
                    names: vec![location.name],
                });
            }
            state.by_name.remove(&previous);
            state.by_name.insert(location.name.clone(), location.id);
        }
        state.rows.insert(location.id, location.clone());
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn new_location(name: &str) -> NewStorageLocation {
        NewStorageLocation::new(name, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryLocationStore::new();
        let rows = store
            .insert_all(vec![new_location("A1"), new_location("A2")])
            .await
            .unwrap();
        assert_eq!(rows[0].id, LocationId(1));
        assert_eq!(rows[1].id, LocationId(2));

        let row = store.insert_one(new_location("A3")).await.unwrap();
        assert_eq!(row.id, LocationId(3));
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn conflicting_batch_inserts_nothing() {
        let store = MemoryLocationStore::new();
        store.insert_one(new_location("A1")).await.unwrap();

        let err = store
            .insert_all(vec![new_location("A0"), new_location("A1"), new_location("A2")])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Conflict {
                names: vec!["A1".to_string()]
            }
        );
        assert_eq!(store.len(), 1);
        assert!(!store.contains("A0"));
        assert!(!store.contains("A2"));
    }

    #[tokio::test]
    async fn duplicate_names_within_batch_conflict() {
        let store = MemoryLocationStore::new();
        let err = store
            .insert_all(vec![new_location("B"), new_location("B")])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Conflict {
                names: vec!["B".to_string()]
            }
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn find_existing_returns_only_known_names() {
        let store = MemoryLocationStore::new();
        store
            .insert_all(vec![new_location("A1"), new_location("B1")])
            .await
            .unwrap();
        let names = ["A1", "Z9", "B1"].map(String::from);
        assert_eq!(store.find_existing(&names).await.unwrap(), ["A1", "B1"]);
    }

    #[tokio::test]
    async fn update_renames_and_guards_uniqueness() {
        let store = MemoryLocationStore::new();
        let rows = store
            .insert_all(vec![new_location("A1"), new_location("A2")])
            .await
            .unwrap();

        let mut renamed = rows[0].clone();
        renamed.name = "A9".into();
        store.update(renamed).await.unwrap();
        assert!(store.contains("A9"));
        assert!(!store.contains("A1"));

        let mut clash = rows[1].clone();
        clash.name = "A9".into();
        assert!(matches!(
            store.update(clash).await,
            Err(StoreError::Conflict { .. })
        ));

        let mut missing = rows[1].clone();
        missing.id = LocationId(99);
        assert_eq!(
            store.update(missing).await,
            Err(StoreError::NotFound { id: LocationId(99) })
        );
    }

    #[tokio::test]
    async fn list_and_get() {
        let store = MemoryLocationStore::new();
        let rows = store
            .insert_all(vec![new_location("X"), new_location("Y")])
            .await
            .unwrap();
        assert_eq!(store.list().await.unwrap(), rows);
        assert_eq!(store.get(rows[1].id).await.unwrap(), Some(rows[1].clone()));
        assert_eq!(store.get(LocationId(404)).await.unwrap(), None);
    }
}
