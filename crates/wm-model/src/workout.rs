//! Workout records and their derived metrics.
//!
//! A [`Workout`] keeps its base fields private so the derived metric can only
//! change through [`Workout::update_base`], which recomputes it before returning.

use chrono::{DateTime, Utc};
use core::fmt;
use wm_core::{Coords, Real, WorkoutId};

use crate::validate::{ValidationError, validate_base};

/// Discriminant of the closed set of workout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            WorkoutType::Running => "🏃‍♂️",
            WorkoutType::Cycling => "🚴‍♀️",
        }
    }

    /// Name of the variant-specific field, as used in error messages and forms.
    pub fn extra_field(self) -> &'static str {
        match self {
            WorkoutType::Running => "cadence",
            WorkoutType::Cycling => "elevation_gain",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific, user-editable field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutKind {
    /// Steps per minute.
    Running { cadence: Real },
    /// Meters; negative for net descents.
    Cycling { elevation_gain: Real },
}

impl WorkoutKind {
    fn new(workout_type: WorkoutType, extra: Real) -> Self {
        match workout_type {
            WorkoutType::Running => WorkoutKind::Running { cadence: extra },
            WorkoutType::Cycling => WorkoutKind::Cycling {
                elevation_gain: extra,
            },
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self {
            WorkoutKind::Running { .. } => WorkoutType::Running,
            WorkoutKind::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    /// The variant value (cadence or elevation gain).
    pub fn extra(&self) -> Real {
        match *self {
            WorkoutKind::Running { cadence } => cadence,
            WorkoutKind::Cycling { elevation_gain } => elevation_gain,
        }
    }
}

/// Metric derived from distance and duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// Minutes per kilometer.
    Pace(Real),
    /// Kilometers per hour.
    Speed(Real),
}

impl Metric {
    pub(crate) fn derive(workout_type: WorkoutType, distance: Real, duration: Real) -> Self {
        match workout_type {
            WorkoutType::Running => Metric::Pace(duration / distance),
            WorkoutType::Cycling => Metric::Speed(distance / (duration / 60.0)),
        }
    }

    pub fn value(&self) -> Real {
        match *self {
            Metric::Pace(v) | Metric::Speed(v) => v,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Pace(_) => "min/km",
            Metric::Speed(_) => "km/h",
        }
    }
}

/// Base fields of a previously stored workout, used to rebuild it.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutParts {
    pub id: WorkoutId,
    pub workout_type: WorkoutType,
    pub coords: Coords,
    pub distance: Real,
    pub duration: Real,
    pub extra: Real,
    pub created_at: DateTime<Utc>,
    /// Rebuilt from type and creation time when absent.
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    coords: Coords,
    distance: Real,
    duration: Real,
    created_at: DateTime<Utc>,
    description: String,
    kind: WorkoutKind,
    metric: Metric,
}

impl Workout {
    /// Create a new workout stamped with the current time.
    pub fn create(
        workout_type: WorkoutType,
        coords: Coords,
        distance: Real,
        duration: Real,
        extra: Real,
    ) -> Result<Self, ValidationError> {
        Self::create_at(workout_type, coords, distance, duration, extra, Utc::now())
    }

    /// Like [`Workout::create`] with an explicit creation time.
    pub fn create_at(
        workout_type: WorkoutType,
        coords: Coords,
        distance: Real,
        duration: Real,
        extra: Real,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::restore(WorkoutParts {
            id: WorkoutId::generate(),
            workout_type,
            coords,
            distance,
            duration,
            extra,
            created_at,
            description: None,
        })
    }

    /// Rebuild a workout from stored base fields.
    ///
    /// Runs the same validation as creation and re-derives the metric; any
    /// derived value that was stored alongside is never consulted.
    pub fn restore(parts: WorkoutParts) -> Result<Self, ValidationError> {
        if !parts.coords.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "coords",
                value: format!("[{}, {}]", parts.coords.lat, parts.coords.lng),
                reason: "must be finite",
            });
        }
        validate_base(parts.workout_type, parts.distance, parts.duration, parts.extra)?;

        let description = parts
            .description
            .unwrap_or_else(|| describe(parts.workout_type, &parts.created_at));

        Ok(Self {
            id: parts.id,
            coords: parts.coords,
            distance: parts.distance,
            duration: parts.duration,
            created_at: parts.created_at,
            description,
            kind: WorkoutKind::new(parts.workout_type, parts.extra),
            metric: Metric::derive(parts.workout_type, parts.distance, parts.duration),
        })
    }

    /// Replace the editable base fields and recompute the derived metric.
    ///
    /// Identity, coordinates, creation time and description never change. On
    /// error the workout is left untouched.
    pub fn update_base(
        &mut self,
        distance: Real,
        duration: Real,
        extra: Real,
    ) -> Result<(), ValidationError> {
        let workout_type = self.workout_type();
        validate_base(workout_type, distance, duration, extra)?;

        self.distance = distance;
        self.duration = duration;
        self.kind = WorkoutKind::new(workout_type, extra);
        self.metric = Metric::derive(workout_type, distance, duration);
        Ok(())
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Kilometers.
    pub fn distance(&self) -> Real {
        self.distance
    }

    /// Minutes.
    pub fn duration(&self) -> Real {
        self.duration
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.kind.workout_type()
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn pace(&self) -> Option<Real> {
        match self.metric {
            Metric::Pace(v) => Some(v),
            Metric::Speed(_) => None,
        }
    }

    pub fn speed(&self) -> Option<Real> {
        match self.metric {
            Metric::Speed(v) => Some(v),
            Metric::Pace(_) => None,
        }
    }

    pub fn cadence(&self) -> Option<Real> {
        match self.kind {
            WorkoutKind::Running { cadence } => Some(cadence),
            WorkoutKind::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<Real> {
        match self.kind {
            WorkoutKind::Cycling { elevation_gain } => Some(elevation_gain),
            WorkoutKind::Running { .. } => None,
        }
    }

    /// Popup text for the workout's map marker.
    pub fn marker_label(&self) -> String {
        format!("{} {}", self.workout_type().icon(), self.description)
    }
}

/// "Running on April 14"
fn describe(workout_type: WorkoutType, created_at: &DateTime<Utc>) -> String {
    format!("{} on {}", workout_type.label(), created_at.format("%B %-d"))
}
