//! Raw text entered in the new-workout and edit forms.

use wm_core::{Real, parse_number};
use wm_model::{ValidationError, Workout, WorkoutType};

/// Field values as typed by the user.
///
/// `extra` is the cadence for runs and the elevation gain for rides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutForm {
    pub distance: String,
    pub duration: String,
    pub extra: String,
}

/// Parsed, finite form values. Range checks happen when the workout is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormValues {
    pub distance: Real,
    pub duration: Real,
    pub extra: Real,
}

impl WorkoutForm {
    pub fn new(
        distance: impl Into<String>,
        duration: impl Into<String>,
        extra: impl Into<String>,
    ) -> Self {
        Self {
            distance: distance.into(),
            duration: duration.into(),
            extra: extra.into(),
        }
    }

    /// Pre-filled with the workout's current values, for editing.
    pub fn from_workout(workout: &Workout) -> Self {
        Self::new(
            workout.distance().to_string(),
            workout.duration().to_string(),
            workout.kind().extra().to_string(),
        )
    }

    pub fn parse(&self, workout_type: WorkoutType) -> Result<FormValues, ValidationError> {
        Ok(FormValues {
            distance: parse_number(&self.distance, "distance")?,
            duration: parse_number(&self.duration, "duration")?,
            extra: parse_number(&self.extra, workout_type.extra_field())?,
        })
    }
}
