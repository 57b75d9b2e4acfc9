//! Overlap detection between bodies

use crate::body::{Body, BodyId, BodyKind};

/// Which contact rule applies to an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// A black hole swallows a planet
    Absorption { black_hole: BodyId, planet: BodyId },
    /// Two planets bounce elastically
    Bounce,
    /// Two black holes overlap; nothing beyond gravity happens
    BlackHolePair,
}

impl ContactKind {
    /// Classifies a pair by body kind
    ///
    /// Matching is exhaustive, so a new body kind has to decide its contact
    /// rules here.
    pub fn between(a: &Body, b: &Body) -> Self {
        match (a.kind, b.kind) {
            (BodyKind::Planet, BodyKind::Planet) => ContactKind::Bounce,
            (BodyKind::BlackHole, BodyKind::Planet) => ContactKind::Absorption {
                black_hole: a.id,
                planet: b.id,
            },
            (BodyKind::Planet, BodyKind::BlackHole) => ContactKind::Absorption {
                black_hole: b.id,
                planet: a.id,
            },
            (BodyKind::BlackHole, BodyKind::BlackHole) => ContactKind::BlackHolePair,
        }
    }
}

/// A detected overlap between two bodies
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionEvent {
    /// Earlier body in store order
    pub body_a: BodyId,
    /// Later body in store order
    pub body_b: BodyId,
    /// Distance between centers
    pub separation: f64,
    /// Sum of radii that the separation fell below
    pub contact_distance: f64,
    pub kind: ContactKind,
}

/// Check if a pair of bodies overlap
fn check_pair(a: &Body, b: &Body) -> Option<CollisionEvent> {
    let separation = a.distance_to(b);
    let contact_distance = a.radius + b.radius;

    (separation < contact_distance).then(|| CollisionEvent {
        body_a: a.id,
        body_b: b.id,
        separation,
        contact_distance,
        kind: ContactKind::between(a, b),
    })
}

/// Collision detector trait
pub trait CollisionDetector: Send + Sync {
    /// Detect every overlapping pair
    ///
    /// Events are reported in body order: pairs `(i, j)` with `i < j`,
    /// sorted by `i` then `j`.
    fn detect(&self, bodies: &[Body]) -> Vec<CollisionEvent>;
}

/// Direct O(N²) detector
///
/// Checks every unordered pair once.
///
/// # Examples
///
/// ```
/// use spacetime::collisions::{CollisionDetector, DirectDetector};
/// use spacetime::body::{Body, BodyId, BodyKind, SizeClass};
/// use nalgebra::{Point3, Vector3};
///
/// let at = |id, x| Body {
///     id: BodyId(id),
///     kind: BodyKind::Planet,
///     size_class: SizeClass::Medium,
///     mass: 1.5,
///     radius: 0.8,
///     position: Point3::new(x, 0.0, 0.0),
///     velocity: Vector3::zeros(),
/// };
///
/// let events = DirectDetector.detect(&[at(0, 0.0), at(1, 1.0), at(2, 5.0)]);
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].body_a, BodyId(0));
/// assert_eq!(events[0].body_b, BodyId(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDetector;

impl CollisionDetector for DirectDetector {
    fn detect(&self, bodies: &[Body]) -> Vec<CollisionEvent> {
        let n = bodies.len();

        (0..n)
            .flat_map(|i| ((i + 1)..n).filter_map(move |j| check_pair(&bodies[i], &bodies[j])))
            .collect()
    }
}
