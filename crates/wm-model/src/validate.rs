//! Field validation for workout base values.

use crate::workout::{Metric, WorkoutType};
use wm_core::{CoreError, Real};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Not a number: {field} = {input:?}")]
    NotANumber { field: &'static str, input: String },
}

impl From<CoreError> for ValidationError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => ValidationError::InvalidValue {
                field: what,
                value: value.to_string(),
                reason: "must be finite",
            },
            CoreError::NotANumber { what, input } => ValidationError::NotANumber {
                field: what,
                input,
            },
        }
    }
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidValue { field, .. } => field,
            ValidationError::NotANumber { field, .. } => field,
        }
    }
}

/// Checks the base fields shared by every variant plus the variant's extra value.
///
/// Running cadence must be positive; cycling elevation gain only has to be finite,
/// since descents are recorded as negative gain. The derived pace or speed must
/// also come out finite.
pub fn validate_base(
    workout_type: WorkoutType,
    distance: Real,
    duration: Real,
    extra: Real,
) -> Result<(), ValidationError> {
    validate_positive_finite("distance", distance)?;
    validate_positive_finite("duration", duration)?;
    match workout_type {
        WorkoutType::Running => validate_positive_finite("cadence", extra)?,
        WorkoutType::Cycling => validate_finite("elevation_gain", extra)?,
    }

    let metric = Metric::derive(workout_type, distance, duration);
    if !metric.value().is_finite() {
        return Err(ValidationError::InvalidValue {
            field: match metric {
                Metric::Pace(_) => "pace",
                Metric::Speed(_) => "speed",
            },
            value: metric.value().to_string(),
            reason: "distance and duration give a non-finite result",
        });
    }
    Ok(())
}

fn validate_positive_finite(field: &'static str, value: Real) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "must be positive and finite",
        });
    }
    Ok(())
}

fn validate_finite(field: &'static str, value: Real) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field,
            value: value.to_string(),
            reason: "must be finite",
        });
    }
    Ok(())
}
