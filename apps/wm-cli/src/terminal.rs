//! Terminal stand-ins for the list widget and the map.

use wm_app::{ListRenderer, MarkerLayer};
use wm_core::{Coords, WorkoutId};
use wm_model::{Workout, WorkoutKind};

/// Prints list instructions as text rows.
#[derive(Default)]
pub struct TerminalList;

impl ListRenderer for TerminalList {
    fn render_list(&mut self, workouts: &[Workout]) {
        if workouts.is_empty() {
            println!("No workouts recorded");
            return;
        }
        for workout in workouts {
            print_workout(workout);
        }
    }

    fn replace_list_node(&mut self, _id: &WorkoutId, workout: &Workout) {
        println!("✓ Updated workout");
        print_workout(workout);
    }

    fn remove_list_node(&mut self, id: &WorkoutId) {
        println!("✓ Removed workout {}", id);
    }

    fn clear_list(&mut self) {}
}

/// Prints marker instructions; there is no map to draw on.
#[derive(Default)]
pub struct TerminalMap {
    pub verbose: bool,
}

impl MarkerLayer for TerminalMap {
    fn place_marker(&mut self, id: &WorkoutId, coords: Coords, label: &str) {
        if self.verbose {
            println!("  marker {} at ({}, {}): {}", id, coords.lat, coords.lng, label);
        }
    }

    fn remove_marker(&mut self, id: &WorkoutId) {
        if self.verbose {
            println!("  marker {} removed", id);
        }
    }

    fn center_on(&mut self, coords: Coords, zoom: u8) {
        println!("Map centered on ({}, {}) at zoom {}", coords.lat, coords.lng, zoom);
    }
}

fn print_workout(workout: &Workout) {
    let kind = workout.workout_type();
    let extra = match *workout.kind() {
        WorkoutKind::Running { cadence } => format!("🦶🏼 {} spm", cadence),
        WorkoutKind::Cycling { elevation_gain } => format!("⛰ {} m", elevation_gain),
    };
    let metric = workout.metric();
    println!("{}  [{}]", workout.description(), workout.id());
    println!(
        "  {} {} km  ⏱ {} min  ⚡️ {:.1} {}  {}",
        kind.icon(),
        workout.distance(),
        workout.duration(),
        metric.value(),
        metric.unit(),
        extra
    );
}
