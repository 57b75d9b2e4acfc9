use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

/// What a body is, which decides its size table and collision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Planet,
    BlackHole,
}

/// Size class chosen by the user when placing a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

/// A point mass resting on (or falling through) the fabric
///
/// `mass` and `radius` come from the size table when the body is created
/// and stay fixed; only `position` and `velocity` evolve.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: BodyId,
    pub kind: BodyKind,
    pub size_class: SizeClass,
    pub mass: f64,
    pub radius: f64,
    pub position: Point3<f64>,  // world units, y-up
    pub velocity: Vector3<f64>, // world units / second
}

impl Body {
    pub fn is_black_hole(&self) -> bool {
        matches!(self.kind, BodyKind::BlackHole)
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Distance in the fabric plane (x/z) to a point, ignoring height
    pub fn horizontal_distance_to(&self, x: f64, z: f64) -> f64 {
        let dx = self.position.x - x;
        let dz = self.position.z - z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Distance in the fabric plane from the world origin
    pub fn horizontal_radius(&self) -> f64 {
        self.horizontal_distance_to(0.0, 0.0)
    }
}

/// Serializable copy of a body handed to renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub id: u64,
    pub kind: BodyKind,
    pub size_class: SizeClass,
    pub mass: f64,
    pub radius: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id.0,
            kind: body.kind,
            size_class: body.size_class,
            mass: body.mass,
            radius: body.radius,
            position: [body.position.x, body.position.y, body.position.z],
            velocity: [body.velocity.x, body.velocity.y, body.velocity.z],
        }
    }
}
