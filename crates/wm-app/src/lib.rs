//! Application layer for waymark.
//!
//! The [`Controller`] owns the workout collection and its persistence, applies
//! user commands, and answers each one with an [`Update`]: the list and marker
//! instructions a front end must apply to stay consistent with the collection.

pub mod controller;
pub mod error;
pub mod form;
pub mod instructions;
pub mod settings;

pub use controller::{Controller, EditDraft, MapState};
pub use error::{AppError, AppResult};
pub use form::{FormValues, WorkoutForm};
pub use instructions::{
    ListRenderer, MarkerInstruction, MarkerLayer, PositionProvider, PositionUnavailable,
    StaticPosition, Update, ViewInstruction,
};
pub use settings::{DEFAULT_MAP_ZOOM, Settings};
