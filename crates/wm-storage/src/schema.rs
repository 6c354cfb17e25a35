//! Persisted workout layout.
//!
//! One JSON object per workout:
//!
//! ```json
//! {
//!   "id": "5b0e…",
//!   "type": "running",
//!   "coords": [10.0, 20.0],
//!   "distance": 5.0,
//!   "duration": 30.0,
//!   "createdAt": "2026-04-14T09:30:00Z",
//!   "description": "Running on April 14",
//!   "cadence": 150.0,
//!   "pace": 6.0
//! }
//! ```
//!
//! Cycling entries carry `elevationGain` and `speed` instead of `cadence` and
//! `pace`. Derived values are written for readers of the raw file and ignored
//! when loading. Older snapshots spelled some fields differently
//! (`descriptipn`, `elevation`, `date`); those spellings are still accepted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wm_core::{Coords, WorkoutId};
use wm_model::{Metric, ValidationError, Workout, WorkoutKind, WorkoutParts, WorkoutType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredType {
    Running,
    Cycling,
}

impl From<WorkoutType> for StoredType {
    fn from(t: WorkoutType) -> Self {
        match t {
            WorkoutType::Running => StoredType::Running,
            WorkoutType::Cycling => StoredType::Cycling,
        }
    }
}

impl From<StoredType> for WorkoutType {
    fn from(t: StoredType) -> Self {
        match t {
            StoredType::Running => WorkoutType::Running,
            StoredType::Cycling => WorkoutType::Cycling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkout {
    pub id: WorkoutId,
    #[serde(rename = "type")]
    pub workout_type: StoredType,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "descriptipn", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, alias = "elevation", skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Why a stored entry could not become a [`Workout`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RestoreError {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl StoredWorkout {
    pub fn from_workout(workout: &Workout) -> Self {
        let (cadence, elevation_gain) = match *workout.kind() {
            WorkoutKind::Running { cadence } => (Some(cadence), None),
            WorkoutKind::Cycling { elevation_gain } => (None, Some(elevation_gain)),
        };
        let (pace, speed) = match workout.metric() {
            Metric::Pace(p) => (Some(p), None),
            Metric::Speed(s) => (None, Some(s)),
        };

        Self {
            id: workout.id().clone(),
            workout_type: workout.workout_type().into(),
            coords: workout.coords(),
            distance: workout.distance(),
            duration: workout.duration(),
            created_at: *workout.created_at(),
            description: Some(workout.description().to_string()),
            cadence,
            elevation_gain,
            pace,
            speed,
        }
    }

    /// Validate the base fields and rebuild the workout, re-deriving its metric.
    pub fn into_workout(self) -> Result<Workout, RestoreError> {
        let workout_type: WorkoutType = self.workout_type.into();
        let extra = match workout_type {
            WorkoutType::Running => self.cadence.ok_or(RestoreError::MissingField("cadence"))?,
            WorkoutType::Cycling => self
                .elevation_gain
                .ok_or(RestoreError::MissingField("elevationGain"))?,
        };

        let workout = Workout::restore(WorkoutParts {
            id: self.id,
            workout_type,
            coords: self.coords,
            distance: self.distance,
            duration: self.duration,
            extra,
            created_at: self.created_at,
            description: self.description,
        })?;
        Ok(workout)
    }
}
