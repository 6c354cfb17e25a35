//! Error types for the wm-app service layer.

use std::path::PathBuf;

/// Error surfaced to front ends.
///
/// Stale ids and corrupt stored entries never show up here; the controller
/// recovers from those on its own.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(#[from] wm_model::ValidationError),

    #[error("Map is not ready: no position available")]
    PositionUnavailable,

    #[error("Storage error: {0}")]
    Storage(#[from] wm_storage::StorageError),

    #[error("Collection error: {0}")]
    Model(#[from] wm_model::ModelError),

    #[error("Failed to read settings file: {path}")]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {message}")]
    Settings { path: PathBuf, message: String },
}

/// Result type for wm-app operations.
pub type AppResult<T> = Result<T, AppError>;
