//! Time integration for the body simulation
//!
//! The default integrator is semi-implicit Euler: every velocity is kicked
//! by the accelerations of the current configuration, then every position
//! drifts with its new velocity. A kick-drift-kick leapfrog is available for
//! hosts that want better energy behaviour at twice the force cost.

use crate::body::Body;
use crate::config::IntegratorKind;
use crate::forces::ForceModel;

/// A time integrator
///
/// Integrators advance bodies in place by computing accelerations from a
/// force model and updating velocities and positions.
pub trait Integrator: Send + Sync {
    /// Advance every body by one timestep
    ///
    /// # Arguments
    ///
    /// * `bodies` - Bodies to advance (modified in place)
    /// * `dt` - Timestep in seconds
    /// * `force` - Force model to compute accelerations
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel);

    /// Advance every body by `n_steps` timesteps
    fn integrate(&self, bodies: &mut [Body], dt: f64, n_steps: usize, force: &dyn ForceModel) {
        for _ in 0..n_steps {
            self.step(bodies, dt, force);
        }
    }
}

/// Updates velocities from all accelerations of the current configuration
fn kick(bodies: &mut [Body], dt: f64, force: &dyn ForceModel) {
    let accelerations = force.accelerations(bodies);

    bodies
        .iter_mut()
        .zip(accelerations.iter())
        .for_each(|(body, accel)| {
            body.velocity += accel * dt;
        });
}

fn drift(bodies: &mut [Body], dt: f64) {
    bodies.iter_mut().for_each(|body| {
        body.position += body.velocity * dt;
    });
}

/// Semi-implicit (symplectic) Euler, first order
///
/// 1. Kick: v += a(x) · dt
/// 2. Drift: x += v · dt
///
/// # Examples
///
/// ```
/// use spacetime::integrator::{Integrator, SemiImplicitEuler};
/// use spacetime::forces::CutoffGravity;
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
/// let mut bodies = [body(0, -2.0), body(1, 2.0)];
///
/// SemiImplicitEuler.step(&mut bodies, 1.0 / 60.0, &CutoffGravity::default());
///
/// assert!(bodies[0].position.x > -2.0);
/// assert!(bodies[1].position.x < 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel) {
        kick(bodies, dt, force);
        drift(bodies, dt);
    }
}

/// Symplectic leapfrog integrator (2nd order, kick-drift-kick)
///
/// 1. Kick: v(t + dt/2) = v(t) + a(t) * dt/2
/// 2. Drift: x(t + dt) = x(t) + v(t + dt/2) * dt
/// 3. Kick: v(t + dt) = v(t + dt/2) + a(t + dt) * dt/2
#[derive(Debug, Clone, Copy, Default)]
pub struct Leapfrog;

impl Integrator for Leapfrog {
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel) {
        kick(bodies, dt / 2.0, force);
        drift(bodies, dt);
        kick(bodies, dt / 2.0, force);
    }
}

impl IntegratorKind {
    /// The integrator this configuration names
    pub fn integrator(self) -> &'static dyn Integrator {
        match self {
            IntegratorKind::SemiImplicitEuler => &SemiImplicitEuler,
            IntegratorKind::Leapfrog => &Leapfrog,
        }
    }
}
