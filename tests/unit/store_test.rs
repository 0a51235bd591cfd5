//! Unit tests for the registry store facade.

use std::cell::RefCell;
use std::rc::Rc;

use vesselmarks::managers::registry_store::{BookmarkStore, RegistryStore};
use vesselmarks::persistence::save_node::SaveNode;
use vesselmarks::persistence::text;
use vesselmarks::types::bookmark::{Bookmark, BookmarkKind};
use vesselmarks::types::simulation::{
    PartSnapshot, SimSnapshot, VesselSituation, VesselSnapshot,
};

fn sim() -> SimSnapshot {
    SimSnapshot {
        universal_time: 2_000.0,
        loaded_vessels: vec![
            VesselSnapshot {
                persistent_id: 42,
                name: "Duna Express".to_string(),
                vessel_type: "Ship".to_string(),
                body_name: "Duna".to_string(),
                situation: VesselSituation::Orbiting,
                parts: vec![PartSnapshot {
                    flight_id: 900,
                    name: "Mk1-3 Command Pod".to_string(),
                    part_type: "Command".to_string(),
                }],
            },
            VesselSnapshot {
                persistent_id: 43,
                name: "Mun Station".to_string(),
                vessel_type: "Station".to_string(),
                body_name: "Mun".to_string(),
                situation: VesselSituation::Orbiting,
                parts: Vec::new(),
            },
        ],
        ..SimSnapshot::default()
    }
}

fn vessel_bookmark(sim: &SimSnapshot, persistent_id: u32) -> Bookmark {
    let vessel = sim.find_vessel(persistent_id).expect("vessel in fixture");
    Bookmark::for_vessel(vessel, sim.universal_time)
}

fn pod_bookmark(sim: &SimSnapshot, flight_id: u32) -> Bookmark {
    let (_, part) = sim.find_part(flight_id).expect("part in fixture");
    Bookmark::for_command_module(part, sim.universal_time)
}

/// Helper: store with a counting change listener attached.
fn store_with_counter() -> (RegistryStore, Rc<RefCell<usize>>) {
    let mut store = RegistryStore::new();
    let counter = Rc::new(RefCell::new(0usize));
    let inner = Rc::clone(&counter);
    store.subscribe(move || *inner.borrow_mut() += 1);
    (store, counter)
}

#[test]
fn test_add_and_lookup_across_kinds() {
    let sim = sim();
    let mut store = RegistryStore::new();

    assert!(store.add(vessel_bookmark(&sim, 42), &sim));
    assert!(store.add(pod_bookmark(&sim, 900), &sim));

    assert!(store.has(BookmarkKind::Vessel, 42));
    assert!(store.has(BookmarkKind::CommandModule, 900));
    // Ids are unique per kind, not globally.
    assert!(!store.has(BookmarkKind::Vessel, 900));
    assert_eq!(
        store.get(BookmarkKind::Vessel, 42).map(|b| b.cache.vessel_name.as_str()),
        Some("Duna Express")
    );
}

#[test]
fn test_all_lists_kinds_in_fixed_order() {
    let sim = sim();
    let mut store = RegistryStore::new();
    store.add(vessel_bookmark(&sim, 42), &sim);
    store.add(vessel_bookmark(&sim, 43), &sim);
    store.add(pod_bookmark(&sim, 900), &sim);

    let all: Vec<(BookmarkKind, u32)> = store.all().iter().map(|b| (b.kind(), b.id)).collect();

    assert_eq!(
        all,
        vec![
            (BookmarkKind::CommandModule, 900),
            (BookmarkKind::Vessel, 42),
            (BookmarkKind::Vessel, 43),
        ]
    );
}

#[test]
fn test_notification_fires_once_per_completed_mutation() {
    let sim = sim();
    let (mut store, counter) = store_with_counter();

    assert!(store.add(vessel_bookmark(&sim, 42), &sim));
    assert_eq!(*counter.borrow(), 1);

    assert!(store.add(vessel_bookmark(&sim, 43), &sim));
    assert_eq!(*counter.borrow(), 2);

    assert!(store.move_down(BookmarkKind::Vessel, 42));
    assert_eq!(*counter.borrow(), 3);

    assert!(store.set_comment(BookmarkKind::Vessel, 42, "note"));
    assert_eq!(*counter.borrow(), 4);

    assert!(store.remove(BookmarkKind::Vessel, 42));
    assert_eq!(*counter.borrow(), 5);
}

#[test]
fn test_rejected_operations_do_not_notify() {
    let sim = sim();
    let (mut store, counter) = store_with_counter();
    store.add(vessel_bookmark(&sim, 42), &sim);
    let baseline = *counter.borrow();

    // Duplicate id.
    assert!(!store.add(vessel_bookmark(&sim, 42), &sim));
    // Boundary no-op.
    assert!(!store.move_up(BookmarkKind::Vessel, 42));
    // Unknown id.
    assert!(!store.remove(BookmarkKind::Vessel, 7));
    // Unresolvable on creation.
    assert!(!store.add(vessel_bookmark(&sim, 43), &SimSnapshot::default()));

    assert_eq!(*counter.borrow(), baseline);
}

#[test]
fn test_refresh_all_notifies_once() {
    let sim = sim();
    let (mut store, counter) = store_with_counter();
    store.add(vessel_bookmark(&sim, 42), &sim);
    store.add(pod_bookmark(&sim, 900), &sim);
    let baseline = *counter.borrow();

    store.refresh_all(&sim);

    assert_eq!(*counter.borrow(), baseline + 1);
}

#[test]
fn test_registry_lookup_alone_creates_nothing() {
    let store = RegistryStore::new();

    assert!(store.registry(BookmarkKind::Vessel).is_none());
    assert!(!store.has(BookmarkKind::Vessel, 42));
    assert!(store.get(BookmarkKind::Vessel, 42).is_none());
    assert!(store.all().is_empty());
    assert!(store.registry(BookmarkKind::Vessel).is_none());
}

#[test]
fn test_save_load_round_trip() {
    let sim = sim();
    let mut store = RegistryStore::new();
    store.add(vessel_bookmark(&sim, 42), &sim);
    store.add(vessel_bookmark(&sim, 43), &sim);
    store.add(pod_bookmark(&sim, 900), &sim);
    store.set_comment(BookmarkKind::Vessel, 43, "refuel here");
    store.move_up(BookmarkKind::Vessel, 43);

    let mut root = SaveNode::new("GAME");
    store.save(&mut root);

    let (mut reloaded, counter) = store_with_counter();
    reloaded.load(&root, &sim);

    // One aggregate notification for the whole load.
    assert_eq!(*counter.borrow(), 1);

    let before: Vec<Bookmark> = store.all().into_iter().cloned().collect();
    let after: Vec<Bookmark> = reloaded.all().into_iter().cloned().collect();
    assert_eq!(after, before);
    assert_eq!(
        reloaded
            .get(BookmarkKind::Vessel, 43)
            .map(|b| b.comment.as_str()),
        Some("refuel here")
    );
}

#[test]
fn test_save_twice_produces_identical_trees() {
    let sim = sim();
    let mut store = RegistryStore::new();
    store.add(vessel_bookmark(&sim, 42), &sim);
    store.add(pod_bookmark(&sim, 900), &sim);

    let mut first = SaveNode::new("GAME");
    store.save(&mut first);
    let mut second = first.clone();
    store.save(&mut second);

    assert_eq!(first, second);
    assert_eq!(text::to_string(&first), text::to_string(&second));
}

#[test]
fn test_load_against_empty_sim_keeps_cached_fields() {
    let sim = sim();
    let mut store = RegistryStore::new();
    store.add(vessel_bookmark(&sim, 42), &sim);
    store.add(pod_bookmark(&sim, 900), &sim);

    let mut root = SaveNode::new("GAME");
    store.save(&mut root);

    // Reload before any vessel has streamed in.
    let mut reloaded = RegistryStore::new();
    reloaded.load(&root, &SimSnapshot::default());

    assert_eq!(reloaded.all().len(), 2);
    let vessel = reloaded
        .get(BookmarkKind::Vessel, 42)
        .expect("entry survives an empty simulation");
    assert_eq!(vessel.cache.vessel_id, 0);
    assert_eq!(vessel.cache.display_title, "Duna Express");

    // Vessels stream in later; refresh resolves the entries in place.
    reloaded.refresh_all(&sim);
    assert_eq!(
        reloaded
            .get(BookmarkKind::Vessel, 42)
            .map(|b| b.cache.vessel_id),
        Some(42)
    );
}

#[test]
fn test_snapshot_serializes_for_ui_consumption() {
    let sim = sim();
    let mut store = RegistryStore::new();
    store.add(vessel_bookmark(&sim, 42), &sim);

    let json = serde_json::to_value(store.all()).expect("snapshot serializes");

    let entry = &json[0];
    assert_eq!(entry["id"], 42);
    assert_eq!(entry["cache"]["vessel_name"], "Duna Express");
    assert_eq!(entry["cache"]["vessel_situation_label"], "Orbiting Duna");
}

#[test]
fn test_load_replaces_previous_contents() {
    let sim = sim();
    let mut store = RegistryStore::new();
    store.add(vessel_bookmark(&sim, 42), &sim);

    let mut root = SaveNode::new("GAME");
    store.save(&mut root);

    store.add(vessel_bookmark(&sim, 43), &sim);
    store.load(&root, &sim);

    assert!(store.has(BookmarkKind::Vessel, 42));
    assert!(!store.has(BookmarkKind::Vessel, 43));
}
