//! Reconciliation controller.
//!
//! Each request runs to completion: mutate the collection, persist the full
//! snapshot, project for display, and return the instructions that bring the
//! list and the map in line. Requests naming an id that is no longer present
//! are dropped quietly; the front end may be one render behind.

use wm_core::{Coords, WorkoutId};
use wm_model::{SortKey, Workout, WorkoutLog, WorkoutType, project};
use wm_storage::{KeyValueStore, Persistence};

use crate::error::{AppError, AppResult};
use crate::form::WorkoutForm;
use crate::instructions::{
    MarkerInstruction, PositionProvider, PositionUnavailable, Update, ViewInstruction,
};
use crate::settings::DEFAULT_MAP_ZOOM;

/// Whether the map can accept markers yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapState {
    /// Waiting for the position provider.
    Pending,
    Ready(Coords),
    /// The provider failed; creating workouts stays disabled.
    Unavailable,
}

/// Values for an edit form opened on an existing workout.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub id: WorkoutId,
    pub workout_type: WorkoutType,
    pub form: WorkoutForm,
}

pub struct Controller<S> {
    log: WorkoutLog,
    persistence: Persistence<S>,
    sort_key: SortKey,
    map: MapState,
    zoom: u8,
}

impl<S: KeyValueStore> Controller<S> {
    /// Empty controller; call [`Controller::reload`] or [`Controller::start`]
    /// to pick up the stored snapshot.
    pub fn new(persistence: Persistence<S>) -> Self {
        Self {
            log: WorkoutLog::new(),
            persistence,
            sort_key: SortKey::default(),
            map: MapState::Pending,
            zoom: DEFAULT_MAP_ZOOM,
        }
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn workouts(&self) -> &[Workout] {
        self.log.all()
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.log.find_by_id(id)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn map_state(&self) -> MapState {
        self.map
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Workouts in current display order.
    pub fn projected(&self) -> Vec<&Workout> {
        project(self.log.all(), self.sort_key)
    }

    /// Reload from storage, then ask `provider` for the map position.
    pub fn start(&mut self, provider: &mut dyn PositionProvider) -> AppResult<Update> {
        let mut update = self.reload()?;
        update.merge(self.position_resolved(provider.current_position()));
        Ok(update)
    }

    /// Rebuild the collection and sort preference from storage.
    ///
    /// Markers are emitted in canonical order only when the map is ready;
    /// otherwise they follow once the position resolves. On a ready map the
    /// markers of the previous collection are removed first.
    pub fn reload(&mut self) -> AppResult<Update> {
        let previous: Vec<WorkoutId> = self.log.ids().cloned().collect();
        let snapshot = self.persistence.load()?;
        if !snapshot.dropped.is_empty() {
            tracing::warn!(
                dropped = snapshot.dropped.len(),
                "skipped corrupt stored workouts"
            );
        }

        self.log.replace_all(snapshot.workouts)?;
        self.sort_key = snapshot.sort_key;
        tracing::info!(count = self.log.len(), sort = %self.sort_key, "reloaded workouts");

        let mut update = Update::default();
        if let MapState::Ready(_) = self.map {
            update
                .markers
                .extend(previous.into_iter().map(MarkerInstruction::RemoveMarker));
        }
        update.merge(self.render_all());
        if let MapState::Ready(_) = self.map {
            self.place_all_markers(&mut update);
        }
        Ok(update)
    }

    /// Record the outcome of the position request.
    pub fn position_resolved(&mut self, position: Result<Coords, PositionUnavailable>) -> Update {
        let mut update = Update::default();
        match position {
            Ok(coords) => {
                let was_ready = matches!(self.map, MapState::Ready(_));
                self.map = MapState::Ready(coords);
                update.markers.push(MarkerInstruction::CenterOn {
                    coords,
                    zoom: self.zoom,
                });
                if !was_ready {
                    self.place_all_markers(&mut update);
                }
                tracing::info!(lat = coords.lat, lng = coords.lng, "map ready");
            }
            Err(err) => {
                tracing::warn!(%err, "map unavailable, workout creation disabled");
                if !matches!(self.map, MapState::Ready(_)) {
                    self.map = MapState::Unavailable;
                }
            }
        }
        update
    }

    /// Add a workout at `coords` from the submitted form.
    pub fn create(
        &mut self,
        workout_type: WorkoutType,
        coords: Coords,
        form: &WorkoutForm,
    ) -> AppResult<Update> {
        if !matches!(self.map, MapState::Ready(_)) {
            return Err(AppError::PositionUnavailable);
        }

        let values = form.parse(workout_type)?;
        let workout = Workout::create(
            workout_type,
            coords,
            values.distance,
            values.duration,
            values.extra,
        )?;

        let before = self.log.clone();
        self.log.append(workout.clone())?;
        if let Err(err) = self.persist() {
            self.log = before;
            return Err(err);
        }
        tracing::info!(id = %workout.id(), kind = %workout_type, "created workout");

        let mut update = self.render_all();
        update.place_marker(&workout);
        Ok(update)
    }

    /// Pre-filled edit form for `id`, or `None` when it is gone.
    pub fn open_edit(&self, id: &WorkoutId) -> Option<EditDraft> {
        let workout = self.log.find_by_id(id)?;
        Some(EditDraft {
            id: id.clone(),
            workout_type: workout.workout_type(),
            form: WorkoutForm::from_workout(workout),
        })
    }

    /// Apply edited values to `id`.
    ///
    /// Only that workout's list entry is replaced. The list is not re-sorted,
    /// even when the edited field is the active sort key.
    pub fn edit(&mut self, id: &WorkoutId, form: &WorkoutForm) -> AppResult<Update> {
        let before = self.log.clone();
        let Some(workout) = self.log.find_by_id_mut(id) else {
            tracing::debug!(%id, "edit of unknown workout ignored");
            return Ok(Update::default());
        };

        let values = form.parse(workout.workout_type())?;
        workout.update_base(values.distance, values.duration, values.extra)?;
        let edited = workout.clone();

        if let Err(err) = self.persist() {
            self.log = before;
            return Err(err);
        }
        tracing::info!(%id, "edited workout");

        Ok(Update {
            view: vec![ViewInstruction::ReplaceNode {
                id: id.clone(),
                workout: edited,
            }],
            markers: Vec::new(),
        })
    }

    /// Remove `id` from the collection, storage, list and map.
    pub fn delete(&mut self, id: &WorkoutId) -> AppResult<Update> {
        let before = self.log.clone();
        if !self.log.remove_by_id(id) {
            tracing::debug!(%id, "delete of unknown workout ignored");
            return Ok(Update::default());
        }

        if let Err(err) = self.persist() {
            self.log = before;
            return Err(err);
        }
        tracing::info!(%id, "deleted workout");

        Ok(Update {
            view: vec![ViewInstruction::RemoveNode(id.clone())],
            markers: vec![MarkerInstruction::RemoveMarker(id.clone())],
        })
    }

    /// Switch the display order. Markers are unaffected.
    pub fn set_sort(&mut self, sort_key: SortKey) -> AppResult<Update> {
        let previous = self.sort_key;
        self.sort_key = sort_key;
        if let Err(err) = self.persist() {
            self.sort_key = previous;
            return Err(err);
        }
        tracing::debug!(sort = %sort_key, "sort key changed");
        Ok(self.render_all())
    }

    /// Center the map on `id`.
    pub fn focus(&self, id: &WorkoutId) -> Update {
        let mut update = Update::default();
        if !matches!(self.map, MapState::Ready(_)) {
            return update;
        }
        match self.log.find_by_id(id) {
            Some(workout) => update.markers.push(MarkerInstruction::CenterOn {
                coords: workout.coords(),
                zoom: self.zoom,
            }),
            None => tracing::debug!(%id, "focus on unknown workout ignored"),
        }
        update
    }

    /// Drop all stored state and start over with an empty collection.
    ///
    /// The reload that follows removes every marker the old collection placed.
    pub fn reset(&mut self) -> AppResult<Update> {
        self.persistence.clear()?;
        tracing::info!(removed = self.log.len(), "reset workouts");
        self.reload()
    }

    fn persist(&mut self) -> AppResult<()> {
        self.persistence.save(self.log.all(), self.sort_key)?;
        Ok(())
    }

    fn render_all(&self) -> Update {
        Update::full_render(self.projected())
    }

    fn place_all_markers(&self, update: &mut Update) {
        for workout in self.log.all() {
            update.place_marker(workout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wm_storage::MemoryStore;

    fn ready_controller() -> Controller<MemoryStore> {
        let mut controller = Controller::new(Persistence::new(MemoryStore::new()));
        controller.position_resolved(Ok(Coords { lat: 0.0, lng: 0.0 }));
        controller
    }

    #[test]
    fn create_requires_ready_map() {
        let mut controller = Controller::new(Persistence::new(MemoryStore::new()));
        let form = WorkoutForm::new("5", "30", "150");
        let here = Coords { lat: 10.0, lng: 20.0 };

        let err = controller
            .create(WorkoutType::Running, here, &form)
            .unwrap_err();
        assert!(matches!(err, AppError::PositionUnavailable));

        controller.position_resolved(Err(PositionUnavailable {
            reason: "denied".to_string(),
        }));
        assert_eq!(controller.map_state(), MapState::Unavailable);
        assert!(controller.create(WorkoutType::Running, here, &form).is_err());
        assert!(controller.workouts().is_empty());
        assert!(controller.persistence().store().is_empty());
    }

    #[test]
    fn zoom_is_used_for_centering() {
        let mut controller =
            Controller::new(Persistence::new(MemoryStore::new())).with_zoom(9);
        let here = Coords { lat: 1.0, lng: 2.0 };
        let update = controller.position_resolved(Ok(here));
        assert_eq!(
            update.markers,
            vec![MarkerInstruction::CenterOn {
                coords: here,
                zoom: 9
            }]
        );
    }

    #[test]
    fn second_position_only_recenters() {
        let mut controller = ready_controller();
        controller
            .create(
                WorkoutType::Running,
                Coords { lat: 1.0, lng: 1.0 },
                &WorkoutForm::new("5", "30", "150"),
            )
            .unwrap();

        let update = controller.position_resolved(Ok(Coords { lat: 2.0, lng: 2.0 }));
        assert_eq!(update.markers.len(), 1);
        assert!(matches!(update.markers[0], MarkerInstruction::CenterOn { .. }));
    }

    #[test]
    fn open_edit_prefills_current_values() {
        let mut controller = ready_controller();
        controller
            .create(
                WorkoutType::Cycling,
                Coords { lat: 1.0, lng: 1.0 },
                &WorkoutForm::new("20", "60", "100"),
            )
            .unwrap();
        let id = controller.workouts()[0].id().clone();

        let draft = controller.open_edit(&id).unwrap();
        assert_eq!(draft.workout_type, WorkoutType::Cycling);
        assert_eq!(draft.form, WorkoutForm::new("20", "60", "100"));
        assert!(controller.open_edit(&WorkoutId::from("gone")).is_none());
    }
}
