use std::collections::HashSet;

use crate::body::{Body, BodyId, BodyKind, SizeClass};
use crate::config::SizeTable;
use nalgebra::{Point3, Vector3};

/// Ordered collection of every live body
///
/// Iteration order is insertion order and stays stable for the whole of a
/// tick; pairwise passes rely on it for tie-breaking. Ids are handed out
/// monotonically and never reused, even after removal or [`clear`].
///
/// [`clear`]: BodyStore::clear
#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    bodies: Vec<Body>,
    /// Next available body ID
    next_id: u64,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body whose mass and radius come from the size table
    ///
    /// # Arguments
    ///
    /// * `sizes` - Size-class table
    /// * `kind` - Planet or black hole
    /// * `size_class` - Which row entry to use
    /// * `position` - Initial world position
    /// * `velocity` - Initial velocity (usually zero)
    ///
    /// # Examples
    ///
    /// ```
    /// use spacetime::body::{BodyKind, SizeClass};
    /// use spacetime::config::SizeTable;
    /// use spacetime::state::BodyStore;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// let sizes = SizeTable::default();
    /// let mut store = BodyStore::new();
    ///
    /// let id = store.add_body(
    ///     &sizes,
    ///     BodyKind::Planet,
    ///     SizeClass::Medium,
    ///     Point3::origin(),
    ///     Vector3::zeros(),
    /// );
    ///
    /// assert_eq!(store.body_count(), 1);
    /// assert_eq!(store.get_body(id).unwrap().mass, 1.5);
    /// ```
    pub fn add_body(
        &mut self,
        sizes: &SizeTable,
        kind: BodyKind,
        size_class: SizeClass,
        position: Point3<f64>,
        velocity: Vector3<f64>,
    ) -> BodyId {
        let spec = sizes.get(kind, size_class);
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body {
            id,
            kind,
            size_class,
            mass: spec.mass,
            radius: spec.radius,
            position,
            velocity,
        });
        id
    }

    /// Removes a body, keeping the order of the rest
    ///
    /// Returns the removed body, or `None` if the id is unknown.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    /// Removes every body whose id is in `ids` in a single pass
    ///
    /// Unknown or repeated ids are ignored. Returns how many bodies were
    /// removed.
    pub fn remove_all(&mut self, ids: &[BodyId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let doomed: HashSet<BodyId> = ids.iter().copied().collect();
        let before = self.bodies.len();
        self.bodies.retain(|b| !doomed.contains(&b.id));
        before - self.bodies.len()
    }

    /// Drops every body; ids keep counting up
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Mutable access for position/velocity updates
    ///
    /// Mass and radius are public fields on [`Body`], but only
    /// [`add_body`](BodyStore::add_body) sets them.
    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector3::zeros(), |acc, p| acc + p)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }
}
