use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId, BodyKind, SizeClass};
use crate::collisions::resolution::*;
use crate::collisions::{CollisionDetector, DirectDetector};

fn planet(id: u64, mass: f64, position: Point3<f64>, velocity: Vector3<f64>) -> Body {
    Body {
        id: BodyId(id),
        kind: BodyKind::Planet,
        size_class: SizeClass::Medium,
        mass,
        radius: 0.8,
        position,
        velocity,
    }
}

fn black_hole(id: u64, position: Point3<f64>) -> Body {
    Body {
        id: BodyId(id),
        kind: BodyKind::BlackHole,
        size_class: SizeClass::Medium,
        mass: 7.5,
        radius: 2.0,
        position,
        velocity: Vector3::new(0.1, 0.0, 0.0),
    }
}

fn resolve(bodies: &mut [Body]) -> CollisionOutcome {
    let events = DirectDetector.detect(bodies);
    resolve_collisions(bodies, &events)
}

#[test]
fn test_equal_mass_head_on_swap() {
    let v = 3.0;
    let mut a = planet(0, 2.0, Point3::new(-0.5, 0.0, 0.0), Vector3::new(v, 0.0, 0.0));
    let mut b = planet(1, 2.0, Point3::new(0.5, 0.0, 0.0), Vector3::new(-v, 0.0, 0.0));

    assert!(elastic_bounce(&mut a, &mut b));

    assert_eq!(a.velocity, Vector3::new(-v, 0.0, 0.0));
    assert_eq!(b.velocity, Vector3::new(v, 0.0, 0.0));
}

#[test]
fn test_bounce_conserves_momentum() {
    let mut a = planet(0, 1.0, Point3::new(0.0, 0.0, 0.0), Vector3::new(4.0, 0.0, 1.0));
    let mut b = planet(1, 3.0, Point3::new(1.0, 0.0, 0.5), Vector3::new(-1.0, 0.5, 0.0));

    let p_before = a.momentum() + b.momentum();
    assert!(elastic_bounce(&mut a, &mut b));
    let p_after = a.momentum() + b.momentum();

    assert_relative_eq!(p_before, p_after, epsilon = 1e-12);
}

#[test]
fn test_bounce_conserves_kinetic_energy() {
    let mut a = planet(0, 1.0, Point3::new(0.0, 0.0, 0.0), Vector3::new(4.0, 0.0, 1.0));
    let mut b = planet(1, 3.0, Point3::new(1.0, 0.0, 0.5), Vector3::new(-1.0, 0.5, 0.0));

    let e_before = a.kinetic_energy() + b.kinetic_energy();
    elastic_bounce(&mut a, &mut b);
    let e_after = a.kinetic_energy() + b.kinetic_energy();

    assert_relative_eq!(e_before, e_after, epsilon = 1e-12);
}

#[test]
fn test_head_on_formula() {
    let (m1, m2) = (1.0, 3.0);
    let (v1, v2) = (4.0, -2.0);
    let mut a = planet(0, m1, Point3::new(0.0, 0.0, 0.0), Vector3::new(v1, 0.0, 0.0));
    let mut b = planet(1, m2, Point3::new(1.0, 0.0, 0.0), Vector3::new(v2, 0.0, 0.0));

    elastic_bounce(&mut a, &mut b);

    let v1_expected = (v1 * (m1 - m2) + 2.0 * m2 * v2) / (m1 + m2);
    let v2_expected = (v2 * (m2 - m1) + 2.0 * m1 * v1) / (m1 + m2);
    assert_relative_eq!(a.velocity.x, v1_expected, epsilon = 1e-12);
    assert_relative_eq!(b.velocity.x, v2_expected, epsilon = 1e-12);
}

#[test]
fn test_tangential_velocity_untouched() {
    let mut a = planet(0, 1.0, Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 5.0));
    let mut b = planet(1, 1.0, Point3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, -2.0));

    elastic_bounce(&mut a, &mut b);

    assert_relative_eq!(a.velocity.z, 5.0);
    assert_relative_eq!(b.velocity.z, -2.0);
}

#[test]
fn test_separating_pair_not_bounced() {
    let mut a = planet(0, 1.0, Point3::new(0.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
    let mut b = planet(1, 1.0, Point3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));

    assert!(!elastic_bounce(&mut a, &mut b));
    assert_eq!(a.velocity.x, -1.0);
    assert_eq!(b.velocity.x, 1.0);
}

#[test]
fn test_coincident_centers_not_bounced() {
    let mut a = planet(0, 1.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
    let mut b = planet(1, 1.0, Point3::origin(), Vector3::new(-1.0, 0.0, 0.0));

    assert!(!elastic_bounce(&mut a, &mut b));
}

#[test]
fn test_positions_not_separated() {
    let mut bodies = [
        planet(0, 1.0, Point3::new(-0.3, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
        planet(1, 1.0, Point3::new(0.3, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)),
    ];

    let outcome = resolve(&mut bodies);

    assert_eq!(outcome.bounces, 1);
    assert!(outcome.absorbed.is_empty());
    assert_eq!(bodies[0].position.x, -0.3);
    assert_eq!(bodies[1].position.x, 0.3);
}

#[test]
fn test_black_hole_absorbs_planet() {
    let mut bodies = [
        planet(0, 1.5, Point3::origin(), Vector3::zeros()),
        black_hole(1, Point3::new(2.0, 0.0, 0.0)),
    ];

    let outcome = resolve(&mut bodies);

    assert_eq!(outcome.absorbed, vec![BodyId(0)]);
    assert_eq!(outcome.bounces, 0);

    // Black hole unaffected
    assert_eq!(bodies[1].mass, 7.5);
    assert_eq!(bodies[1].radius, 2.0);
    assert_eq!(bodies[1].velocity, Vector3::new(0.1, 0.0, 0.0));
}

#[test]
fn test_absorbed_planet_skips_later_events() {
    // Planet 1 overlaps the hole and planet 2; the hole event comes first
    let mut bodies = [
        black_hole(0, Point3::new(-2.5, 0.0, 0.0)),
        planet(1, 1.0, Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
        planet(2, 1.0, Point3::new(1.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)),
    ];

    let outcome = resolve(&mut bodies);

    assert_eq!(outcome.absorbed, vec![BodyId(1)]);
    assert_eq!(outcome.bounces, 0);
    assert_eq!(bodies[2].velocity.x, -1.0);
}

#[test]
fn test_one_hole_absorbs_many() {
    let mut bodies = [
        planet(0, 1.0, Point3::new(-1.0, 0.0, 0.0), Vector3::zeros()),
        black_hole(1, Point3::origin()),
        planet(2, 1.0, Point3::new(0.0, 0.0, 1.0), Vector3::zeros()),
    ];

    let outcome = resolve(&mut bodies);

    assert_eq!(outcome.absorbed, vec![BodyId(0), BodyId(2)]);
}

#[test]
fn test_black_holes_pass_through() {
    let mut bodies = [
        black_hole(0, Point3::origin()),
        black_hole(1, Point3::new(1.0, 0.0, 0.0)),
    ];
    let before = bodies;

    let outcome = resolve(&mut bodies);

    assert_eq!(outcome, CollisionOutcome::default());
    assert_eq!(bodies[0].velocity, before[0].velocity);
    assert_eq!(bodies[1].velocity, before[1].velocity);
}

#[test]
fn test_resolution_does_not_remove() {
    let mut bodies = [
        planet(0, 1.5, Point3::origin(), Vector3::zeros()),
        black_hole(1, Point3::new(1.0, 0.0, 0.0)),
    ];

    resolve(&mut bodies);
    assert_eq!(bodies.len(), 2);
}

#[test]
fn test_stale_event_ids_ignored() {
    let mut bodies = [planet(0, 1.0, Point3::origin(), Vector3::zeros())];
    let events = vec![crate::collisions::CollisionEvent {
        body_a: BodyId(0),
        body_b: BodyId(99),
        separation: 0.1,
        contact_distance: 1.6,
        kind: crate::collisions::ContactKind::Bounce,
    }];

    let outcome = resolve_collisions(&mut bodies, &events);
    assert_eq!(outcome.bounces, 0);
}
