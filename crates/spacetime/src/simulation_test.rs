use nalgebra::{Point3, Vector3};

use crate::body::{BodyId, BodyKind, SizeClass};
use crate::config::{IntegratorKind, SimulationConfig};
use crate::error::ConfigError;
use crate::simulation::Simulation;

#[test]
fn test_new_rejects_invalid_config() {
    let mut config = SimulationConfig::default();
    config.fabric.divisions = 0;
    assert!(matches!(
        Simulation::new(config),
        Err(ConfigError::ZeroDivisions)
    ));
}

#[test]
fn test_new_simulation_is_empty_and_flat() {
    let sim = Simulation::default();
    assert_eq!(sim.body_count(), 0);
    assert_eq!(sim.time(), 0.0);
    assert_eq!(sim.steps(), 0);
    assert_eq!(sim.fabric().sample_count(), 41 * 41);
    assert!(sim.height_field().is_flat());
}

#[test]
fn test_create_body_at_rest_with_table_size() {
    let mut sim = Simulation::default();
    let id = sim.create_body(
        BodyKind::BlackHole,
        Point3::new(1.0, 0.0, 2.0),
        SizeClass::Small,
    );

    let body = sim.body(id).unwrap();
    assert_eq!(body.mass, 2.5);
    assert_eq!(body.radius, 1.5);
    assert_eq!(body.velocity, Vector3::zeros());
    assert_eq!(body.position, Point3::new(1.0, 0.0, 2.0));
}

#[test]
fn test_delete_body() {
    let mut sim = Simulation::default();
    let id = sim.create_body(BodyKind::Planet, Point3::origin(), SizeClass::Medium);

    assert!(sim.delete_body(id));
    assert_eq!(sim.body_count(), 0);

    // Second delete is a no-op
    assert!(!sim.delete_body(id));
    assert!(!sim.delete_body(BodyId(1234)));
}

#[test]
fn test_set_body_position_keeps_velocity() {
    let mut sim = Simulation::default();
    let id = sim.create_body_with_velocity(
        BodyKind::Planet,
        Point3::origin(),
        Vector3::new(1.0, 0.0, 0.0),
        SizeClass::Medium,
    );

    assert!(sim.set_body_position(id, Point3::new(-4.0, 1.0, 2.0)));

    let body = sim.body(id).unwrap();
    assert_eq!(body.position, Point3::new(-4.0, 1.0, 2.0));
    assert_eq!(body.velocity, Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_set_position_of_unknown_body_is_noop() {
    let mut sim = Simulation::default();
    let id = sim.create_body(BodyKind::Planet, Point3::origin(), SizeClass::Medium);
    sim.delete_body(id);

    assert!(!sim.set_body_position(id, Point3::new(1.0, 1.0, 1.0)));
    assert_eq!(sim.body_count(), 0);
}

#[test]
fn test_step_advances_time() {
    let mut sim = Simulation::default();
    let report = sim.tick();

    assert_eq!(report.dt, 1.0 / 60.0);
    assert_eq!(sim.time(), 1.0 / 60.0);
    assert_eq!(sim.steps(), 1);
}

#[test]
fn test_long_frames_are_clamped() {
    let mut sim = Simulation::default();
    let report = sim.step(5.0);
    assert_eq!(report.dt, 0.1);
}

#[test]
fn test_invalid_dt_treated_as_zero() {
    let mut sim = Simulation::default();
    let id = sim.create_body_with_velocity(
        BodyKind::Planet,
        Point3::origin(),
        Vector3::new(1.0, 0.0, 0.0),
        SizeClass::Medium,
    );

    for dt in [f64::NAN, f64::INFINITY, -1.0] {
        let report = sim.step(dt);
        assert_eq!(report.dt, 0.0);
    }

    assert_eq!(sim.body(id).unwrap().position, Point3::origin());
    assert_eq!(sim.time(), 0.0);
}

#[test]
fn test_zero_dt_still_resolves_and_warps() {
    let mut sim = Simulation::default();
    sim.create_body(BodyKind::Planet, Point3::origin(), SizeClass::Medium);
    sim.create_body(BodyKind::BlackHole, Point3::new(1.0, 0.0, 0.0), SizeClass::Medium);

    let report = sim.step(0.0);

    assert_eq!(report.absorbed.len(), 1);
    assert_eq!(sim.body_count(), 1);
    assert!(!sim.height_field().is_flat());
}

#[test]
fn test_step_removes_escaped_bodies() {
    let mut sim = Simulation::default();
    let far = sim.create_body(BodyKind::Planet, Point3::new(15.0, 0.0, 0.0), SizeClass::Small);
    let near = sim.create_body(BodyKind::Planet, Point3::new(1.0, 0.0, 0.0), SizeClass::Small);

    let report = sim.tick();

    assert_eq!(report.escaped, vec![far]);
    assert!(sim.body(near).is_some());
    assert!(sim.body(far).is_none());
}

#[test]
fn test_escaped_body_no_longer_warps_fabric() {
    let mut sim = Simulation::default();
    sim.create_body(BodyKind::BlackHole, Point3::new(0.0, -20.0, 0.0), SizeClass::Large);

    sim.tick();

    assert_eq!(sim.body_count(), 0);
    assert!(sim.height_field().is_flat());
}

#[test]
fn test_step_reports_bounce() {
    let mut sim = Simulation::default();
    sim.create_body_with_velocity(
        BodyKind::Planet,
        Point3::new(-0.7, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        SizeClass::Medium,
    );
    sim.create_body_with_velocity(
        BodyKind::Planet,
        Point3::new(0.7, 0.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        SizeClass::Medium,
    );

    let report = sim.tick();

    assert_eq!(report.bounces, 1);
    assert_eq!(sim.body_count(), 2);
    assert!(sim.bodies()[0].velocity.x < 0.0);
    assert!(sim.bodies()[1].velocity.x > 0.0);
}

#[test]
fn test_clear_flattens_and_keeps_ids_fresh() {
    let mut sim = Simulation::default();
    let first = sim.create_body(BodyKind::BlackHole, Point3::origin(), SizeClass::Medium);
    sim.tick();
    assert!(!sim.height_field().is_flat());

    sim.clear();

    assert_eq!(sim.body_count(), 0);
    assert!(sim.height_field().is_flat());
    let second = sim.create_body(BodyKind::Planet, Point3::origin(), SizeClass::Medium);
    assert_ne!(first, second);
}

#[test]
fn test_refresh_fabric_without_stepping() {
    let mut sim = Simulation::default();
    sim.create_body(BodyKind::BlackHole, Point3::origin(), SizeClass::Medium);
    assert!(sim.height_field().is_flat());

    sim.refresh_fabric();

    assert!(!sim.height_field().is_flat());
    assert_eq!(sim.steps(), 0);
}

#[test]
fn test_snapshots_match_bodies() {
    let mut sim = Simulation::default();
    let a = sim.create_body(BodyKind::Planet, Point3::new(1.0, 0.0, 0.0), SizeClass::Large);
    let b = sim.create_body(BodyKind::BlackHole, Point3::new(-5.0, 0.0, 0.0), SizeClass::Small);

    let snapshots = sim.snapshots();
    let ids: Vec<u64> = snapshots.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![a.0, b.0]);
    assert_eq!(snapshots[0].mass, 3.0);
    assert_eq!(snapshots[1].kind, BodyKind::BlackHole);
}

#[test]
fn test_leapfrog_config_runs() {
    let config = SimulationConfig {
        integrator: IntegratorKind::Leapfrog,
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(config).unwrap();
    let planet = sim.create_body(BodyKind::Planet, Point3::origin(), SizeClass::Medium);
    sim.create_body(BodyKind::BlackHole, Point3::new(3.0, 0.0, 0.0), SizeClass::Medium);

    sim.tick();

    assert!(sim.body(planet).unwrap().position.x > 0.0);
}
