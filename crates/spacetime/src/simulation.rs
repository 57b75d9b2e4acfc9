//! The per-frame simulation step and the interface hosts drive it through
//!
//! A [`Simulation`] owns the bodies and the fabric outright. Hosts (a
//! renderer loop, an input handler, a control panel) mutate bodies only
//! through its methods, and since every method takes `&mut self` no edit can
//! ever land in the middle of a step.
//!
//! Each step runs, strictly in this order:
//!
//! 1. integrate velocities and positions under pairwise gravity
//! 2. detect overlaps and apply contact rules
//! 3. remove absorbed planets
//! 4. find bodies outside the bounds
//! 5. remove them
//! 6. rebuild the fabric from the surviving bodies
//!
//! # Examples
//!
//! ```
//! use spacetime::body::{BodyKind, SizeClass};
//! use spacetime::simulation::Simulation;
//! use nalgebra::Point3;
//!
//! let mut sim = Simulation::default();
//! let planet = sim.create_body(BodyKind::Planet, Point3::new(0.0, 0.0, 0.0), SizeClass::Medium);
//! let hole = sim.create_body(BodyKind::BlackHole, Point3::new(3.0, 0.0, 0.0), SizeClass::Medium);
//!
//! while sim.body(planet).is_some() {
//!     sim.tick();
//! }
//!
//! assert_eq!(sim.body_count(), 1);
//! assert!(sim.body(hole).is_some());
//! assert!(sim.height_field().min_height() < 0.0);
//! ```

use log::{debug, info, trace, warn};
use nalgebra::{Point3, Vector3};

use crate::body::{Body, BodyId, BodyKind, BodySnapshot, SizeClass};
use crate::bounds::Bounds;
use crate::collisions::{resolve_collisions, CollisionDetector, DirectDetector};
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::fabric::{Fabric, HeightField};
use crate::forces::CutoffGravity;
use crate::state::BodyStore;

/// What happened during one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// The timestep actually used, after clamping
    pub dt: f64,
    /// Planets swallowed by black holes
    pub absorbed: Vec<BodyId>,
    /// Bodies that left the simulation volume
    pub escaped: Vec<BodyId>,
    /// Planet pairs that bounced
    pub bounces: usize,
}

impl StepReport {
    /// Total bodies removed this step
    pub fn removed(&self) -> usize {
        self.absorbed.len() + self.escaped.len()
    }
}

/// Bodies, fabric and the rules that move them
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    store: BodyStore,
    fabric: Fabric,
    gravity: CutoffGravity,
    detector: DirectDetector,
    bounds: Bounds,
    /// Simulated seconds since creation
    time: f64,
    steps: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::build(SimulationConfig::default())
    }
}

impl Simulation {
    /// Creates an empty simulation after validating `config`
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!("rejected simulation config: {}", err);
            return Err(err);
        }
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        let fabric = Fabric::new(config.fabric.size, config.fabric.divisions);
        info!(
            "fabric {}x{} samples over {} units, integrator {:?}",
            fabric.samples_per_axis(),
            fabric.samples_per_axis(),
            config.fabric.size,
            config.integrator
        );

        Self {
            gravity: config.gravity.into(),
            detector: DirectDetector,
            bounds: Bounds::from_config(&config),
            fabric,
            store: BodyStore::new(),
            config,
            time: 0.0,
            steps: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Body management
    // ------------------------------------------------------------------

    /// Places a new body at rest
    ///
    /// Mass and radius come from the size table for `kind` and
    /// `size_class`. The fabric is not rebuilt until the next step (or
    /// [`refresh_fabric`](Self::refresh_fabric)).
    pub fn create_body(
        &mut self,
        kind: BodyKind,
        position: Point3<f64>,
        size_class: SizeClass,
    ) -> BodyId {
        self.create_body_with_velocity(kind, position, Vector3::zeros(), size_class)
    }

    /// Places a new body with an initial velocity
    pub fn create_body_with_velocity(
        &mut self,
        kind: BodyKind,
        position: Point3<f64>,
        velocity: Vector3<f64>,
        size_class: SizeClass,
    ) -> BodyId {
        self.store
            .add_body(&self.config.sizes, kind, size_class, position, velocity)
    }

    /// Removes a body immediately
    ///
    /// Unknown ids (already absorbed, escaped or deleted) are a no-op and
    /// return `false`.
    pub fn delete_body(&mut self, id: BodyId) -> bool {
        self.store.remove_body(id).is_some()
    }

    /// Moves a body, leaving its velocity untouched
    ///
    /// Used while dragging. Unknown ids are a no-op and return `false`.
    pub fn set_body_position(&mut self, id: BodyId, position: Point3<f64>) -> bool {
        match self.store.get_body_mut(id) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }

    /// Removes every body and flattens the fabric; ids keep counting up
    pub fn clear(&mut self) {
        self.store.clear();
        self.fabric.flatten();
    }

    // ------------------------------------------------------------------
    // Stepping
    // ------------------------------------------------------------------

    /// Clamps a host-supplied timestep into `[0, max_dt]`
    fn sanitize_dt(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt < 0.0 {
            warn!("ignoring invalid timestep {}", dt);
            return 0.0;
        }
        dt.min(self.config.time.max_dt)
    }

    /// Advances the simulation by `dt` seconds
    ///
    /// Measured frame times longer than `time.max_dt` are clamped; negative
    /// or non-finite values advance nothing (bodies still collide, escape
    /// and warp the fabric).
    pub fn step(&mut self, dt: f64) -> StepReport {
        let dt = self.sanitize_dt(dt);
        let integrator = self.config.integrator.integrator();

        integrator.step(self.store.bodies_mut(), dt, &self.gravity);

        let events = self.detector.detect(self.store.bodies());
        let outcome = resolve_collisions(self.store.bodies_mut(), &events);
        self.store.remove_all(&outcome.absorbed);

        let escaped = self.bounds.scan(self.store.bodies());
        if !escaped.is_empty() {
            debug!("pruned out-of-bounds bodies {:?}", escaped);
            self.store.remove_all(&escaped);
        }

        self.fabric
            .recompute(self.store.bodies(), &self.config.fabric.falloff);

        self.time += dt;
        self.steps += 1;

        let report = StepReport {
            dt,
            absorbed: outcome.absorbed,
            escaped,
            bounces: outcome.bounces,
        };
        trace!(
            "step {}: {} bodies, {} removed, {} bounces",
            self.steps,
            self.store.body_count(),
            report.removed(),
            report.bounces
        );
        report
    }

    /// Advances by the configured fixed timestep
    pub fn tick(&mut self) -> StepReport {
        self.step(self.config.time.fixed_dt)
    }

    /// Rebuilds the fabric from the current bodies without stepping
    ///
    /// Useful while paused, after placing or dragging bodies.
    pub fn refresh_fabric(&mut self) {
        self.fabric
            .recompute(self.store.bodies(), &self.config.fabric.falloff);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn bodies(&self) -> &[Body] {
        self.store.bodies()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.store.get_body(id)
    }

    pub fn body_count(&self) -> usize {
        self.store.body_count()
    }

    pub fn store(&self) -> &BodyStore {
        &self.store
    }

    /// Owned copies of every body, for handing across an FFI boundary
    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        self.store.bodies().iter().map(BodySnapshot::from).collect()
    }

    pub fn fabric(&self) -> &Fabric {
        &self.fabric
    }

    pub fn height_field(&self) -> HeightField<'_> {
        self.fabric.height_field()
    }

    /// Simulated seconds since creation
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Steps taken since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
