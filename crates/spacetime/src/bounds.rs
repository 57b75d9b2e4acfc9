//! Simulation volume limits
//!
//! A body has left the simulation once it is farther from the vertical axis
//! than half the fabric side, or once it has fallen below the floor or risen
//! above the ceiling.

use crate::body::{Body, BodyId};
use crate::config::SimulationConfig;

/// Upright cylinder around the origin that bodies must stay inside
///
/// # Examples
///
/// ```
/// use spacetime::bounds::Bounds;
/// use spacetime::body::{Body, BodyId, BodyKind, SizeClass};
/// use nalgebra::{Point3, Vector3};
///
/// let bounds = Bounds::new(10.0, -10.0, 10.0);
/// let at = |id, x, y| Body {
///     id: BodyId(id),
///     kind: BodyKind::Planet,
///     size_class: SizeClass::Small,
///     mass: 0.5,
///     radius: 0.5,
///     position: Point3::new(x, y, 0.0),
///     velocity: Vector3::zeros(),
/// };
///
/// let escaped = bounds.scan(&[at(0, 0.0, 0.0), at(1, 12.0, 0.0), at(2, 0.0, -11.0)]);
/// assert_eq!(escaped, vec![BodyId(1), BodyId(2)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Maximum distance from the vertical axis
    pub horizontal_limit: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Bounds {
    pub fn new(horizontal_limit: f64, floor: f64, ceiling: f64) -> Self {
        Self {
            horizontal_limit,
            floor,
            ceiling,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.horizontal_limit(),
            config.bounds.floor,
            config.bounds.ceiling,
        )
    }

    /// Whether a body is still inside the volume
    ///
    /// A body exactly on a boundary is still inside. Non-finite positions
    /// are outside.
    pub fn contains(&self, body: &Body) -> bool {
        let y = body.position.y;
        body.horizontal_radius() <= self.horizontal_limit && y >= self.floor && y <= self.ceiling
    }

    /// Ids of every body outside the volume, in body order
    pub fn scan(&self, bodies: &[Body]) -> Vec<BodyId> {
        bodies
            .iter()
            .filter(|b| !self.contains(b))
            .map(|b| b.id)
            .collect()
    }
}
