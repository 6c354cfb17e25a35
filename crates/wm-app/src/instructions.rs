//! Instructions emitted by the controller and the collaborators that consume them.
//!
//! Front ends own the list widget, the map and the position source. They only
//! ever act on [`Update`]s and never read the collection back.

use wm_core::{Coords, WorkoutId};
use wm_model::Workout;

/// Change to the rendered workout list.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewInstruction {
    /// Remove every rendered entry.
    ClearList,
    /// Render entries in the given display order.
    RenderList(Vec<Workout>),
    /// Swap a single rendered entry for its updated record.
    ReplaceNode { id: WorkoutId, workout: Workout },
    RemoveNode(WorkoutId),
}

/// Change to the map.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerInstruction {
    PlaceMarker {
        id: WorkoutId,
        coords: Coords,
        label: String,
    },
    RemoveMarker(WorkoutId),
    CenterOn { coords: Coords, zoom: u8 },
}

/// Everything a front end must apply after one request, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub view: Vec<ViewInstruction>,
    pub markers: Vec<MarkerInstruction>,
}

impl Update {
    pub fn is_empty(&self) -> bool {
        self.view.is_empty() && self.markers.is_empty()
    }

    /// Clear the list and render `ordered` in its place.
    pub(crate) fn full_render<'a>(ordered: impl IntoIterator<Item = &'a Workout>) -> Self {
        Self {
            view: vec![
                ViewInstruction::ClearList,
                ViewInstruction::RenderList(ordered.into_iter().cloned().collect()),
            ],
            markers: Vec::new(),
        }
    }

    pub(crate) fn place_marker(&mut self, workout: &Workout) {
        self.markers.push(MarkerInstruction::PlaceMarker {
            id: workout.id().clone(),
            coords: workout.coords(),
            label: workout.marker_label(),
        });
    }

    /// Append `other`'s instructions after this update's.
    pub fn merge(&mut self, other: Update) {
        self.view.extend(other.view);
        self.markers.extend(other.markers);
    }

    /// Every workout id an instruction refers to.
    pub fn referenced_ids(&self) -> Vec<&WorkoutId> {
        let mut ids = Vec::new();
        for instruction in &self.view {
            match instruction {
                ViewInstruction::ClearList => {}
                ViewInstruction::RenderList(workouts) => ids.extend(workouts.iter().map(|w| w.id())),
                ViewInstruction::ReplaceNode { id, .. } | ViewInstruction::RemoveNode(id) => {
                    ids.push(id)
                }
            }
        }
        for instruction in &self.markers {
            match instruction {
                MarkerInstruction::PlaceMarker { id, .. } | MarkerInstruction::RemoveMarker(id) => {
                    ids.push(id)
                }
                MarkerInstruction::CenterOn { .. } => {}
            }
        }
        ids
    }

    /// Dispatch view instructions to `list`, then marker instructions to `map`.
    pub fn apply(&self, list: &mut dyn ListRenderer, map: &mut dyn MarkerLayer) {
        for instruction in &self.view {
            match instruction {
                ViewInstruction::ClearList => list.clear_list(),
                ViewInstruction::RenderList(workouts) => list.render_list(workouts),
                ViewInstruction::ReplaceNode { id, workout } => list.replace_list_node(id, workout),
                ViewInstruction::RemoveNode(id) => list.remove_list_node(id),
            }
        }
        for instruction in &self.markers {
            match instruction {
                MarkerInstruction::PlaceMarker { id, coords, label } => {
                    map.place_marker(id, *coords, label)
                }
                MarkerInstruction::RemoveMarker(id) => map.remove_marker(id),
                MarkerInstruction::CenterOn { coords, zoom } => map.center_on(*coords, *zoom),
            }
        }
    }
}

/// Rendered workout list.
pub trait ListRenderer {
    /// Append entries for `workouts` in order.
    fn render_list(&mut self, workouts: &[Workout]);

    fn replace_list_node(&mut self, id: &WorkoutId, workout: &Workout);

    fn remove_list_node(&mut self, id: &WorkoutId);

    fn clear_list(&mut self);
}

/// Interactive map with one marker per workout.
pub trait MarkerLayer {
    fn place_marker(&mut self, id: &WorkoutId, coords: Coords, label: &str);

    fn remove_marker(&mut self, id: &WorkoutId);

    fn center_on(&mut self, coords: Coords, zoom: u8);
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Position unavailable: {reason}")]
pub struct PositionUnavailable {
    pub reason: String,
}

/// One-shot source of the user's current position.
pub trait PositionProvider {
    fn current_position(&mut self) -> Result<Coords, PositionUnavailable>;
}

/// Provider answering with a fixed position, or failing when it has none.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StaticPosition(pub Option<Coords>);

impl PositionProvider for StaticPosition {
    fn current_position(&mut self) -> Result<Coords, PositionUnavailable> {
        self.0.ok_or_else(|| PositionUnavailable {
            reason: "no position configured".to_string(),
        })
    }
}
