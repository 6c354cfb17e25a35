use wm_model::SortKey;
use wm_storage::{CorruptRecord, KeyValueStore, MemoryStore, Persistence};

fn store_with(workouts_json: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.set("workout", workouts_json).unwrap();
    store
}

#[test]
fn record_missing_duration_is_dropped() {
    let json = r#"[
        {"id": "a", "type": "running", "coords": [10, 20], "distance": 5, "duration": 30,
         "createdAt": "2026-04-14T09:30:00Z", "description": "Running on April 14", "cadence": 150},
        {"id": "b", "type": "cycling", "coords": [10, 20], "distance": 20,
         "createdAt": "2026-04-14T10:30:00Z", "elevationGain": 100},
        {"id": "c", "type": "cycling", "coords": [11, 21], "distance": 20, "duration": 60,
         "createdAt": "2026-04-15T10:30:00Z", "elevationGain": 100}
    ]"#;

    let snapshot = Persistence::new(store_with(json)).load().unwrap();

    let ids: Vec<&str> = snapshot.workouts.iter().map(|w| w.id().as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(snapshot.workouts[0].pace(), Some(6.0));
    assert_eq!(snapshot.workouts[1].speed(), Some(20.0));
    assert_eq!(snapshot.workouts[1].description(), "Cycling on April 15");
    assert!(matches!(
        snapshot.dropped[..],
        [CorruptRecord::Malformed { index: 1, .. }]
    ));
}

#[test]
fn records_violating_base_invariants_are_dropped() {
    let json = r#"[
        {"id": "zero", "type": "running", "coords": [0, 0], "distance": 0, "duration": 30,
         "createdAt": "2026-04-14T09:30:00Z", "cadence": 150},
        {"id": "negative", "type": "cycling", "coords": [0, 0], "distance": 10, "duration": -5,
         "createdAt": "2026-04-14T09:30:00Z", "elevationGain": 0},
        {"id": "nulls", "type": "running", "coords": [0, 0], "distance": null, "duration": 30,
         "createdAt": "2026-04-14T09:30:00Z", "cadence": 150},
        {"id": "no-cadence", "type": "running", "coords": [0, 0], "distance": 3, "duration": 30,
         "createdAt": "2026-04-14T09:30:00Z"},
        {"id": "swim", "type": "swimming", "coords": [0, 0], "distance": 1, "duration": 30,
         "createdAt": "2026-04-14T09:30:00Z"},
        {"id": "ok", "type": "running", "coords": [0, 0], "distance": 3, "duration": 15,
         "createdAt": "2026-04-14T09:30:00Z", "cadence": 170}
    ]"#;

    let snapshot = Persistence::new(store_with(json)).load().unwrap();

    let ids: Vec<&str> = snapshot.workouts.iter().map(|w| w.id().as_str()).collect();
    assert_eq!(ids, vec!["ok"]);
    assert_eq!(snapshot.dropped.len(), 5);
    assert!(matches!(
        &snapshot.dropped[0],
        CorruptRecord::Invalid { index: 0, id, .. } if id.as_str() == "zero"
    ));
}

#[test]
fn stale_derived_values_are_recomputed() {
    let json = r#"[
        {"id": "a", "type": "running", "coords": [10, 20], "distance": 10, "duration": 30,
         "createdAt": "2026-04-14T09:30:00Z", "cadence": 150, "pace": 6.0}
    ]"#;
    let snapshot = Persistence::new(store_with(json)).load().unwrap();
    assert_eq!(snapshot.workouts[0].pace(), Some(3.0));
}

#[test]
fn unparsable_payload_yields_empty_collection() {
    let mut store = store_with("not json at all");
    store.set("sortValue", "duration").unwrap();

    let snapshot = Persistence::new(store).load().unwrap();
    assert!(snapshot.workouts.is_empty());
    assert_eq!(snapshot.sort_key, SortKey::Duration);
    assert_eq!(snapshot.dropped.len(), 1);
}

#[test]
fn snapshot_from_legacy_writer_loads() {
    let json = r#"[
        {"date": "2024-04-14T09:30:00.000Z", "id": "3412345678", "coords": [51.5, -0.12],
         "distance": 5, "duration": 30, "type": "running", "cadence": 150, "pace": 6,
         "descriptipn": "Running on April 14"},
        {"date": "2024-04-15T09:30:00.000Z", "id": "3412399999", "coords": [51.5, -0.12],
         "distance": 20, "duration": 60, "type": "cycling", "elevation": 120, "speed": 20,
         "descriptipn": "Cycling on April 15"}
    ]"#;

    let snapshot = Persistence::new(store_with(json)).load().unwrap();
    assert_eq!(snapshot.workouts.len(), 2);
    assert_eq!(snapshot.workouts[0].description(), "Running on April 14");
    assert_eq!(snapshot.workouts[1].elevation_gain(), Some(120.0));
}
