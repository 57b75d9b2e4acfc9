//! Collision resolution
//!
//! Rules, per overlapping pair:
//! - black hole + planet: the planet is absorbed; the black hole keeps its
//!   mass, radius and velocity
//! - planet + planet: 1-D elastic collision along the line of centers,
//!   conserving momentum; positions are left overlapping
//! - black hole + black hole: nothing beyond the gravity already applied

use std::collections::HashSet;

use crate::body::{Body, BodyId};
use crate::collisions::{CollisionEvent, ContactKind};
use log::debug;

/// What a resolution pass did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Planets swallowed by black holes, in the order they were absorbed
    pub absorbed: Vec<BodyId>,
    /// Number of planet pairs that bounced
    pub bounces: usize,
}

/// Elastic collision of two bodies projected on their line of centers
///
/// Only the velocity components along the line of centers change, using
///
/// ```text
/// v1' = (v1 (m1 - m2) + 2 m2 v2) / (m1 + m2)
/// v2' = (v2 (m2 - m1) + 2 m1 v1) / (m1 + m2)
/// ```
///
/// Pairs that are already separating, or whose centers coincide, are left
/// alone. Returns whether velocities were changed.
///
/// # Examples
///
/// ```
/// use spacetime::collisions::elastic_bounce;
/// use spacetime::body::{Body, BodyId, BodyKind, SizeClass};
/// use nalgebra::{Point3, Vector3};
///
/// let at = |id, x, vx| Body {
///     id: BodyId(id),
///     kind: BodyKind::Planet,
///     size_class: SizeClass::Medium,
///     mass: 1.5,
///     radius: 0.8,
///     position: Point3::new(x, 0.0, 0.0),
///     velocity: Vector3::new(vx, 0.0, 0.0),
/// };
///
/// let mut a = at(0, -0.5, 2.0);
/// let mut b = at(1, 0.5, -2.0);
/// assert!(elastic_bounce(&mut a, &mut b));
///
/// // Equal masses swap velocities
/// assert_eq!(a.velocity.x, -2.0);
/// assert_eq!(b.velocity.x, 2.0);
/// ```
pub fn elastic_bounce(a: &mut Body, b: &mut Body) -> bool {
    let d = b.position - a.position;
    let r = d.magnitude();
    if r == 0.0 {
        return false;
    }
    let n = d / r;

    let v1 = a.velocity.dot(&n);
    let v2 = b.velocity.dot(&n);

    // Closing speed along n; non-positive means they are moving apart
    if v1 - v2 <= 0.0 {
        return false;
    }

    let (m1, m2) = (a.mass, b.mass);
    let total = m1 + m2;
    let v1_new = (v1 * (m1 - m2) + 2.0 * m2 * v2) / total;
    let v2_new = (v2 * (m2 - m1) + 2.0 * m1 * v1) / total;

    a.velocity += n * (v1_new - v1);
    b.velocity += n * (v2_new - v2);
    true
}

/// Mutable references to two distinct bodies of a slice
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// Applies the contact rules for every event, in event order
///
/// Velocities are updated in place; nothing is removed. A planet absorbed by
/// an earlier event is skipped by every later event, so a stale body never
/// bounces or gets absorbed twice. The caller removes
/// [`CollisionOutcome::absorbed`] afterwards.
///
/// # Examples
///
/// ```
/// use spacetime::collisions::{resolve_collisions, CollisionDetector, DirectDetector};
/// use spacetime::body::{Body, BodyId, BodyKind, SizeClass};
/// use nalgebra::{Point3, Vector3};
///
/// let planet = Body {
///     id: BodyId(0),
///     kind: BodyKind::Planet,
///     size_class: SizeClass::Medium,
///     mass: 1.5,
///     radius: 0.8,
///     position: Point3::origin(),
///     velocity: Vector3::zeros(),
/// };
/// let hole = Body {
///     id: BodyId(1),
///     kind: BodyKind::BlackHole,
///     mass: 7.5,
///     radius: 2.0,
///     position: Point3::new(2.0, 0.0, 0.0),
///     ..planet
/// };
///
/// let mut bodies = [planet, hole];
/// let events = DirectDetector.detect(&bodies);
/// let outcome = resolve_collisions(&mut bodies, &events);
///
/// assert_eq!(outcome.absorbed, vec![BodyId(0)]);
/// ```
pub fn resolve_collisions(bodies: &mut [Body], events: &[CollisionEvent]) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let mut removed: HashSet<BodyId> = HashSet::new();

    for event in events {
        if removed.contains(&event.body_a) || removed.contains(&event.body_b) {
            continue;
        }

        match event.kind {
            ContactKind::Absorption { black_hole, planet } => {
                debug!("black hole {:?} absorbed planet {:?}", black_hole, planet);
                removed.insert(planet);
                outcome.absorbed.push(planet);
            }
            ContactKind::Bounce => {
                let i = bodies.iter().position(|b| b.id == event.body_a);
                let j = bodies.iter().position(|b| b.id == event.body_b);

                if let (Some(i), Some(j)) = (i, j) {
                    if i == j {
                        continue;
                    }
                    let (a, b) = pair_mut(bodies, i, j);
                    if elastic_bounce(a, b) {
                        debug!("planets {:?} and {:?} bounced", event.body_a, event.body_b);
                        outcome.bounces += 1;
                    }
                }
            }
            ContactKind::BlackHolePair => {}
        }
    }

    outcome
}
