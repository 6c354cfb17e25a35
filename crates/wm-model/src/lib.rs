//! wm-model: workout records, the in-memory collection and display projection.

pub mod log;
pub mod projection;
pub mod validate;
pub mod workout;

pub use log::WorkoutLog;
pub use projection::{SortKey, UnknownSortKey, project};
pub use validate::ValidationError;
pub use workout::{Metric, Workout, WorkoutKind, WorkoutParts, WorkoutType};

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Duplicate workout id: {0}")]
    DuplicateId(wm_core::WorkoutId),
}
