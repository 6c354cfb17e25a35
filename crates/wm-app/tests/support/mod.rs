//! Recording collaborators shared by the controller tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use wm_app::{ListRenderer, MarkerLayer};
use wm_core::{Coords, WorkoutId};
use wm_model::Workout;
use wm_storage::{KeyValueStore, StorageError, StorageResult};

/// Rendered list that mirrors what a browser list would hold.
#[derive(Debug, Default)]
pub struct FakeList {
    pub entries: Vec<Workout>,
    pub full_renders: usize,
}

impl FakeList {
    pub fn ids(&self) -> Vec<WorkoutId> {
        self.entries.iter().map(|w| w.id().clone()).collect()
    }
}

impl ListRenderer for FakeList {
    fn render_list(&mut self, workouts: &[Workout]) {
        self.full_renders += 1;
        self.entries.extend(workouts.iter().cloned());
    }

    fn replace_list_node(&mut self, id: &WorkoutId, workout: &Workout) {
        if let Some(slot) = self.entries.iter_mut().find(|w| w.id() == id) {
            *slot = workout.clone();
        }
    }

    fn remove_list_node(&mut self, id: &WorkoutId) {
        self.entries.retain(|w| w.id() != id);
    }

    fn clear_list(&mut self) {
        self.entries.clear();
    }
}

/// Map holding one marker per id.
#[derive(Debug, Default)]
pub struct FakeMap {
    pub markers: BTreeMap<WorkoutId, (Coords, String)>,
    pub center: Option<(Coords, u8)>,
}

impl MarkerLayer for FakeMap {
    fn place_marker(&mut self, id: &WorkoutId, coords: Coords, label: &str) {
        self.markers.insert(id.clone(), (coords, label.to_string()));
    }

    fn remove_marker(&mut self, id: &WorkoutId) {
        self.markers.remove(id);
    }

    fn center_on(&mut self, coords: Coords, zoom: u8) {
        self.center = Some((coords, zoom));
    }
}

/// Store whose writes fail while the shared `fail_writes` flag is set.
///
/// With `only_key` set, only writes to that key fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: wm_storage::MemoryStore,
    pub fail_writes: Rc<Cell<bool>>,
    pub only_key: Option<&'static str>,
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let targeted = self.only_key.is_none_or(|only| only == key);
        if self.fail_writes.get() && targeted {
            return Err(StorageError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.inner.remove(key)
    }
}

pub fn here() -> Coords {
    Coords { lat: 10.0, lng: 20.0 }
}
