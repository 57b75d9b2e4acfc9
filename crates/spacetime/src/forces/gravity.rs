//! Direct pairwise gravity with a hard interaction cutoff (O(N²))

use crate::body::Body;
use crate::config::GravityConfig;
use crate::forces::ForceModel;
use nalgebra::Vector3;

/// Newtonian-like attraction between every pair of bodies
///
/// Each body feels `g · m_other / r²` toward every other body closer than
/// `cutoff`. Pairs farther apart contribute exactly nothing. The `r²` term
/// uses `max(r, min_distance)` so nearly coincident bodies stay finite; two
/// bodies at exactly the same point have no direction and exert no force.
///
/// Every ordered pair is visited, so the pull is mutual: body A accelerates
/// toward B by `g · m_B / r²` and B toward A by `g · m_A / r²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoffGravity {
    pub g: f64,
    pub cutoff: f64,
    pub min_distance: f64,
}

impl CutoffGravity {
    pub fn new(g: f64, cutoff: f64, min_distance: f64) -> Self {
        Self {
            g,
            cutoff,
            min_distance,
        }
    }

    /// Acceleration on `body` caused by `other`
    ///
    /// ```
    /// use spacetime::forces::CutoffGravity;
    /// use spacetime::body::{Body, BodyId, BodyKind, SizeClass};
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let at = |x| Body {
    ///     id: BodyId(0),
    ///     kind: BodyKind::BlackHole,
    ///     size_class: SizeClass::Medium,
    ///     mass: 7.5,
    ///     radius: 2.0,
    ///     position: Point3::new(x, 0.0, 0.0),
    ///     velocity: Vector3::zeros(),
    /// };
    ///
    /// let gravity = CutoffGravity::default();
    /// assert_eq!(gravity.pull(&at(0.0), &at(10.5)), Vector3::zeros());
    /// assert!(gravity.pull(&at(0.0), &at(9.5)).x > 0.0);
    /// ```
    pub fn pull(&self, body: &Body, other: &Body) -> Vector3<f64> {
        let d = other.position - body.position;
        let r = d.magnitude();

        if r > self.cutoff || r == 0.0 {
            return Vector3::zeros();
        }

        let r_eff = r.max(self.min_distance);
        let magnitude = self.g * other.mass / (r_eff * r_eff);
        d * (magnitude / r)
    }
}

impl Default for CutoffGravity {
    fn default() -> Self {
        GravityConfig::default().into()
    }
}

impl From<GravityConfig> for CutoffGravity {
    fn from(config: GravityConfig) -> Self {
        Self::new(config.g, config.cutoff, config.min_distance)
    }
}

impl ForceModel for CutoffGravity {
    fn acceleration(&self, idx: usize, bodies: &[Body]) -> Vector3<f64> {
        let body = &bodies[idx];

        bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, other)| self.pull(body, other))
            .fold(Vector3::zeros(), |acc, a| acc + a)
    }

    fn potential_energy(&self, bodies: &[Body]) -> f64 {
        // Each pair counted once
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..].iter().filter_map(move |b| {
                    let r = a.distance_to(b);
                    (r <= self.cutoff)
                        .then(|| -self.g * a.mass * b.mass / r.max(self.min_distance))
                })
            })
            .sum()
    }
}
