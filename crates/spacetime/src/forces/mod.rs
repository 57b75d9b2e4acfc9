//! Force models for the body simulation
//!
//! This module provides the `ForceModel` trait and the cutoff gravity used
//! to pull bodies toward each other across the fabric.

use crate::body::Body;
use nalgebra::Vector3;

pub mod gravity;


pub use gravity::CutoffGravity;

/// A source of acceleration on bodies
///
/// # Examples
///
/// ```
/// use spacetime::forces::{CutoffGravity, ForceModel};
/// use spacetime::body::{Body, BodyId, BodyKind, SizeClass};
/// use nalgebra::{Point3, Vector3};
///
/// let body = |id, x| Body {
///     id: BodyId(id),
///     kind: BodyKind::Planet,
///     size_class: SizeClass::Medium,
///     mass: 1.5,
///     radius: 0.8,
///     position: Point3::new(x, 0.0, 0.0),
///     velocity: Vector3::zeros(),
/// };
///
/// let gravity = CutoffGravity::default();
/// let accel = gravity.acceleration(0, &[body(0, 0.0), body(1, 3.0)]);
/// assert!(accel.x > 0.0);
/// ```
pub trait ForceModel: Send + Sync {
    /// Acceleration on the body at index `idx` of `bodies`
    fn acceleration(&self, idx: usize, bodies: &[Body]) -> Vector3<f64>;

    /// Accelerations for every body, in slice order
    fn accelerations(&self, bodies: &[Body]) -> Vec<Vector3<f64>> {
        (0..bodies.len())
            .map(|i| self.acceleration(i, bodies))
            .collect()
    }

    /// Potential energy of the whole configuration
    ///
    /// Default implementation returns 0.0.
    fn potential_energy(&self, _bodies: &[Body]) -> f64 {
        0.0
    }
}
