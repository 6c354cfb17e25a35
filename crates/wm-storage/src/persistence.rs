//! Snapshot persistence of the collection and the active sort key.

use std::collections::HashSet;

use wm_core::WorkoutId;
use wm_model::{SortKey, Workout};

use crate::StorageResult;
use crate::kv::KeyValueStore;
use crate::schema::{RestoreError, StoredWorkout};

/// Names of the two logical keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Holds the JSON array of workouts in canonical order.
    pub workouts: String,
    /// Holds the bare sort key string.
    pub sort: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            workouts: "workout".to_string(),
            sort: "sortValue".to_string(),
        }
    }
}

/// A stored entry that was left out of the reconstructed collection.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CorruptRecord {
    #[error("stored workouts are not a JSON array: {message}")]
    NotAList { message: String },

    #[error("entry {index}: malformed record ({message})")]
    Malformed { index: usize, message: String },

    #[error("entry {index} ({id}): {source}")]
    Invalid {
        index: usize,
        id: WorkoutId,
        #[source]
        source: RestoreError,
    },

    #[error("entry {index} ({id}): duplicate id")]
    DuplicateId { index: usize, id: WorkoutId },
}

/// Result of [`Persistence::load`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub workouts: Vec<Workout>,
    pub sort_key: SortKey,
    /// Entries that failed validation and were skipped.
    pub dropped: Vec<CorruptRecord>,
}

pub struct Persistence<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the stored snapshot with `workouts` (canonical order) and `sort_key`.
    ///
    /// If the sort key write fails, the previous workouts value is put back so
    /// that an `Err` leaves storage as it was.
    pub fn save(&mut self, workouts: &[Workout], sort_key: SortKey) -> StorageResult<()> {
        let stored: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from_workout).collect();
        let payload = serde_json::to_string(&stored)?;
        let previous = self.store.get(&self.keys.workouts)?;
        self.store.set(&self.keys.workouts, &payload)?;
        if let Err(err) = self.store.set(&self.keys.sort, sort_key.as_str()) {
            let restored = match &previous {
                Some(value) => self.store.set(&self.keys.workouts, value),
                None => self.store.remove(&self.keys.workouts),
            };
            if let Err(restore_err) = restored {
                tracing::warn!(%restore_err, "could not restore stored workouts");
            }
            return Err(err);
        }
        tracing::debug!(count = workouts.len(), sort = %sort_key, "saved snapshot");
        Ok(())
    }

    /// Read the latest snapshot.
    ///
    /// Missing keys yield an empty collection and [`SortKey::None`]. Entries
    /// that fail to parse, violate base invariants or repeat an earlier id are
    /// dropped individually; a payload that is not an array drops everything.
    pub fn load(&self) -> StorageResult<Snapshot> {
        let mut snapshot = Snapshot {
            sort_key: self.load_sort_key()?,
            ..Snapshot::default()
        };

        let Some(payload) = self.store.get(&self.keys.workouts)? else {
            return Ok(snapshot);
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&payload) {
            Ok(entries) => entries,
            Err(err) => {
                let corrupt = CorruptRecord::NotAList {
                    message: err.to_string(),
                };
                tracing::warn!(%corrupt, "dropping stored workouts");
                snapshot.dropped.push(corrupt);
                return Ok(snapshot);
            }
        };

        let mut seen = HashSet::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match restore_entry(index, entry, &seen) {
                Ok(workout) => {
                    seen.insert(workout.id().clone());
                    snapshot.workouts.push(workout);
                }
                Err(corrupt) => {
                    tracing::warn!(%corrupt, "dropping stored workout");
                    snapshot.dropped.push(corrupt);
                }
            }
        }

        tracing::debug!(
            loaded = snapshot.workouts.len(),
            dropped = snapshot.dropped.len(),
            sort = %snapshot.sort_key,
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Remove both keys.
    pub fn clear(&mut self) -> StorageResult<()> {
        self.store.remove(&self.keys.workouts)?;
        self.store.remove(&self.keys.sort)?;
        Ok(())
    }

    fn load_sort_key(&self) -> StorageResult<SortKey> {
        let Some(raw) = self.store.get(&self.keys.sort)? else {
            return Ok(SortKey::default());
        };
        Ok(raw.parse::<SortKey>().unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring stored sort key");
            SortKey::default()
        }))
    }
}

fn restore_entry(
    index: usize,
    entry: serde_json::Value,
    seen: &HashSet<WorkoutId>,
) -> Result<Workout, CorruptRecord> {
    let stored: StoredWorkout =
        serde_json::from_value(entry).map_err(|err| CorruptRecord::Malformed {
            index,
            message: err.to_string(),
        })?;

    if seen.contains(&stored.id) {
        return Err(CorruptRecord::DuplicateId {
            index,
            id: stored.id,
        });
    }

    let id = stored.id.clone();
    stored
        .into_workout()
        .map_err(|source| CorruptRecord::Invalid { index, id, source })
}
