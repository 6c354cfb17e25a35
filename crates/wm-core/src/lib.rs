//! wm-core: stable foundation for waymark.
//!
//! Contains:
//! - numeric (Real + tolerances + user input parsing)
//! - ids (opaque workout identifiers)
//! - geo (latitude/longitude pairs)
//! - error (shared error types)

pub mod error;
pub mod geo;
pub mod ids;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use geo::Coords;
pub use ids::WorkoutId;
pub use numeric::*;
