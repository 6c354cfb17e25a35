//! In-memory collection of workouts in canonical (insertion) order.

use std::collections::HashSet;
use wm_core::WorkoutId;

use crate::workout::Workout;
use crate::{ModelError, ModelResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutLog {
    workouts: Vec<Workout>,
}

impl WorkoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workout at the end; its id must not already be present.
    pub fn append(&mut self, workout: Workout) -> ModelResult<()> {
        if self.contains(workout.id()) {
            return Err(ModelError::DuplicateId(workout.id().clone()));
        }
        self.workouts.push(workout);
        Ok(())
    }

    /// Remove the workout with `id`, returning whether anything was removed.
    pub fn remove_by_id(&mut self, id: &WorkoutId) -> bool {
        let before = self.workouts.len();
        self.workouts.retain(|w| w.id() != id);
        before != self.workouts.len()
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &WorkoutId) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id() == id)
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Replace the whole collection, keeping the given order as canonical.
    ///
    /// The batch is rejected when two entries share an id; the current
    /// contents are kept in that case.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) -> ModelResult<()> {
        let mut seen = HashSet::with_capacity(workouts.len());
        for workout in &workouts {
            if !seen.insert(workout.id()) {
                return Err(ModelError::DuplicateId(workout.id().clone()));
            }
        }
        self.workouts = workouts;
        Ok(())
    }

    /// Workouts in canonical order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn ids(&self) -> impl Iterator<Item = &WorkoutId> + '_ {
        self.workouts.iter().map(|w| w.id())
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
