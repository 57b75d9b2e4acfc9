use nalgebra::{Point3, Vector3};

use crate::body::{BodyId, BodyKind, SizeClass};
use crate::config::SizeTable;
use crate::state::BodyStore;

fn add_planet(store: &mut BodyStore, x: f64, vx: f64) -> BodyId {
    store.add_body(
        &SizeTable::default(),
        BodyKind::Planet,
        SizeClass::Medium,
        Point3::new(x, 0.0, 0.0),
        Vector3::new(vx, 0.0, 0.0),
    )
}

#[test]
fn test_new_store() {
    let store = BodyStore::new();
    assert!(store.is_empty());
    assert_eq!(store.body_count(), 0);
    assert_eq!(store.total_mass(), 0.0);
}

#[test]
fn test_add_body_uses_size_table() {
    let mut store = BodyStore::new();
    let sizes = SizeTable::default();

    let id = store.add_body(
        &sizes,
        BodyKind::BlackHole,
        SizeClass::Large,
        Point3::new(1.0, 2.0, 3.0),
        Vector3::zeros(),
    );

    let body = store.get_body(id).unwrap();
    assert_eq!(body.kind, BodyKind::BlackHole);
    assert_eq!(body.size_class, SizeClass::Large);
    assert_eq!(body.mass, 15.0);
    assert_eq!(body.radius, 2.5);
    assert_eq!(body.position, Point3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_ids_are_sequential() {
    let mut store = BodyStore::new();
    let id1 = add_planet(&mut store, 0.0, 0.0);
    let id2 = add_planet(&mut store, 1.0, 0.0);

    assert_eq!(id1, BodyId(0));
    assert_eq!(id2, BodyId(1));
}

#[test]
fn test_ids_never_reused() {
    let mut store = BodyStore::new();
    let id1 = add_planet(&mut store, 0.0, 0.0);
    store.remove_body(id1);
    store.clear();

    let id2 = add_planet(&mut store, 0.0, 0.0);
    assert_ne!(id1, id2);
    assert_eq!(id2, BodyId(1));
}

#[test]
fn test_remove_body() {
    let mut store = BodyStore::new();
    let id = add_planet(&mut store, 0.0, 0.0);

    let removed = store.remove_body(id);
    assert_eq!(removed.map(|b| b.id), Some(id));
    assert!(store.is_empty());
}

#[test]
fn test_remove_nonexistent_body() {
    let mut store = BodyStore::new();
    add_planet(&mut store, 0.0, 0.0);

    assert!(store.remove_body(BodyId(999)).is_none());
    assert_eq!(store.body_count(), 1);
}

#[test]
fn test_remove_keeps_order() {
    let mut store = BodyStore::new();
    let a = add_planet(&mut store, 0.0, 0.0);
    let b = add_planet(&mut store, 1.0, 0.0);
    let c = add_planet(&mut store, 2.0, 0.0);

    store.remove_body(b);

    let ids: Vec<BodyId> = store.bodies().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![a, c]);
}

#[test]
fn test_remove_all_is_idempotent() {
    let mut store = BodyStore::new();
    let a = add_planet(&mut store, 0.0, 0.0);
    let b = add_planet(&mut store, 1.0, 0.0);
    let c = add_planet(&mut store, 2.0, 0.0);

    assert_eq!(store.remove_all(&[a, c, a, BodyId(77)]), 2);
    assert_eq!(store.remove_all(&[a, c]), 0);
    assert_eq!(store.remove_all(&[]), 0);

    assert_eq!(store.body_count(), 1);
    assert_eq!(store.bodies()[0].id, b);
}

#[test]
fn test_get_body_mut() {
    let mut store = BodyStore::new();
    let id = add_planet(&mut store, 0.0, 0.0);

    if let Some(body) = store.get_body_mut(id) {
        body.position = Point3::new(5.0, 0.0, 5.0);
    }

    assert_eq!(store.get_body(id).unwrap().position, Point3::new(5.0, 0.0, 5.0));
    assert!(store.get_body_mut(BodyId(42)).is_none());
}

#[test]
fn test_totals() {
    let mut store = BodyStore::new();
    add_planet(&mut store, 0.0, 2.0);
    add_planet(&mut store, 5.0, -1.0);

    assert_eq!(store.total_mass(), 3.0);
    assert_eq!(store.total_momentum(), Vector3::new(1.5, 0.0, 0.0));
    // 0.5 * 1.5 * 4 + 0.5 * 1.5 * 1
    assert!((store.kinetic_energy() - 3.75).abs() < 1e-12);
}
