//! Display ordering of the collection.
//!
//! A projection is a borrowed, reordered view; canonical order is never touched.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::workout::Workout;

/// Field the list view is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Canonical insertion order.
    #[default]
    None,
    /// Longest distance first.
    Distance,
    /// Longest duration first.
    Duration,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::None, SortKey::Distance, SortKey::Duration];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::Distance => "distance",
            SortKey::Duration => "duration",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort key: {0:?} (expected none, distance or duration)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(SortKey::None),
            "distance" => Ok(SortKey::Distance),
            "duration" => Ok(SortKey::Duration),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// Order `workouts` for display under `key`.
///
/// Sorted keys keep only records with a positive value for the field, then
/// order descending. The sort is stable, so ties stay in canonical order.
pub fn project(workouts: &[Workout], key: SortKey) -> Vec<&Workout> {
    let field: fn(&Workout) -> f64 = match key {
        SortKey::None => return workouts.iter().collect(),
        SortKey::Distance => Workout::distance,
        SortKey::Duration => Workout::duration,
    };

    let mut view: Vec<&Workout> = workouts.iter().filter(|w| field(w) > 0.0).collect();
    view.sort_by(|a, b| descending(field(a), field(b)));
    view
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::workout::WorkoutType;
    use proptest::prelude::*;
    use wm_core::{Coords, WorkoutId};

    fn sort_key() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::None),
            Just(SortKey::Distance),
            Just(SortKey::Duration)
        ]
    }

    fn build(fields: &[(bool, f64, f64)]) -> Vec<Workout> {
        fields
            .iter()
            .map(|&(running, distance, duration)| {
                let workout_type = if running {
                    WorkoutType::Running
                } else {
                    WorkoutType::Cycling
                };
                Workout::create(
                    workout_type,
                    Coords { lat: 0.0, lng: 0.0 },
                    distance,
                    duration,
                    120.0,
                )
                .unwrap()
            })
            .collect()
    }

    proptest! {
        #[test]
        fn projection_is_idempotent_and_pure(
            fields in prop::collection::vec((any::<bool>(), 0.5_f64..50.0, 1.0_f64..300.0), 0..20),
            key in sort_key(),
        ) {
            let workouts = build(&fields);
            let snapshot = workouts.clone();

            let first: Vec<WorkoutId> = project(&workouts, key).iter().map(|w| w.id().clone()).collect();
            let second: Vec<WorkoutId> = project(&workouts, key).iter().map(|w| w.id().clone()).collect();

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&workouts, &snapshot);
            prop_assert_eq!(first.len(), workouts.len());
        }

        #[test]
        fn sorted_projection_is_descending(
            fields in prop::collection::vec((any::<bool>(), 0.5_f64..50.0, 1.0_f64..300.0), 0..20),
        ) {
            let workouts = build(&fields);
            let by_distance = project(&workouts, SortKey::Distance);
            prop_assert!(by_distance.windows(2).all(|p| p[0].distance() >= p[1].distance()));
            let by_duration = project(&workouts, SortKey::Duration);
            prop_assert!(by_duration.windows(2).all(|p| p[0].duration() >= p[1].duration()));
        }
    }
}
