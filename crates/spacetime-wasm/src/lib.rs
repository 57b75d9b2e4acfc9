//! WASM bindings for the space-time fabric simulation.
//!
//! This crate lets a browser renderer drive the `spacetime` core: place and
//! drag bodies, advance time once per animation frame, and read back body
//! snapshots plus the fabric heights to draw the grid.
//!
//! # Architecture
//!
//! Each [`FabricSimulation`] owns one `Simulation` outright. JavaScript holds
//! the handle; every call borrows it mutably for its duration, so input
//! handlers and the frame loop can never interleave inside a step.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! const sim = new FabricSimulation();
//!
//! const planet = sim.createBody("planet", 0, 0, 0, "medium");
//! const hole = sim.createBody("black_hole", 3, 0, 0, "medium");
//!
//! function frame(dtSeconds) {
//!   const report = sim.step(dtSeconds);   // { dt, absorbed, escaped, bounces }
//!   const bodies = sim.getBodies();       // [{ id, kind, position, ... }]
//!   const heights = sim.getHeights();     // Float64Array, row-major, x fastest
//!   draw(bodies, heights, sim.samplesPerAxis());
//! }
//! ```

use log::debug;
use nalgebra::{Point3, Vector3};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use spacetime::body::{BodyId, BodyKind, BodySnapshot, SizeClass};
use spacetime::config::SimulationConfig;
use spacetime::simulation::{Simulation, StepReport};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Converts an id handed out to JavaScript back into a core id
fn body_id(id: f64) -> Option<BodyId> {
    (id.is_finite() && id >= 0.0 && id.fract() == 0.0).then(|| BodyId(id as u64))
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Outcome of one step for JavaScript
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSnapshot {
    /// Timestep actually applied, in seconds
    pub dt: f64,
    /// Planets swallowed by black holes
    pub absorbed: Vec<u64>,
    /// Bodies that left the simulation volume
    pub escaped: Vec<u64>,
    pub bounces: usize,
}

impl From<&StepReport> for StepSnapshot {
    fn from(report: &StepReport) -> Self {
        Self {
            dt: report.dt,
            absorbed: report.absorbed.iter().map(|id| id.0).collect(),
            escaped: report.escaped.iter().map(|id| id.0).collect(),
            bounces: report.bounces,
        }
    }
}

/// Complete simulation state snapshot
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    /// Simulated seconds since creation
    pub time: f64,
    pub steps: u64,
    pub bodies: Vec<BodySnapshot>,
    /// Total kinetic energy
    pub kinetic_energy: f64,
    /// Deepest point of the fabric (zero when flat)
    pub min_height: f64,
}

// =============================================================================
// Simulation handle
// =============================================================================

/// A simulation owned by JavaScript
#[wasm_bindgen]
pub struct FabricSimulation {
    inner: Simulation,
}

#[wasm_bindgen]
impl FabricSimulation {
    /// Create a simulation.
    ///
    /// # Arguments
    /// * `config` - Optional configuration object (snake_case keys, every
    ///   field optional). `undefined` or `null` uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FabricSimulation, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            SimulationConfig::default()
        } else {
            from_js(config)?
        };
        let inner = Simulation::new(config).map_err(|e| JsError::new(&e.to_string()))?;
        debug!("created fabric simulation");
        Ok(Self { inner })
    }

    // -------------------------------------------------------------------------
    // Body management
    // -------------------------------------------------------------------------

    /// Place a body at rest.
    ///
    /// # Arguments
    /// * `kind` - `"planet"` or `"black_hole"`
    /// * `x`, `y`, `z` - Position (y is up)
    /// * `size` - `"small"`, `"medium"` or `"large"`
    ///
    /// # Returns
    /// The new body's ID
    #[wasm_bindgen(js_name = createBody)]
    pub fn create_body(
        &mut self,
        kind: JsValue,
        x: f64,
        y: f64,
        z: f64,
        size: JsValue,
    ) -> Result<f64, JsError> {
        self.create_body_with_velocity(kind, x, y, z, 0.0, 0.0, 0.0, size)
    }

    /// Place a body with an initial velocity.
    #[wasm_bindgen(js_name = createBodyWithVelocity)]
    #[allow(clippy::too_many_arguments)]
    pub fn create_body_with_velocity(
        &mut self,
        kind: JsValue,
        x: f64,
        y: f64,
        z: f64,
        vx: f64,
        vy: f64,
        vz: f64,
        size: JsValue,
    ) -> Result<f64, JsError> {
        let kind: BodyKind = from_js(kind)?;
        let size: SizeClass = from_js(size)?;
        let id = self.inner.create_body_with_velocity(
            kind,
            Point3::new(x, y, z),
            Vector3::new(vx, vy, vz),
            size,
        );
        Ok(id.0 as f64)
    }

    /// Remove a body.
    ///
    /// # Returns
    /// true if the body was found and removed
    #[wasm_bindgen(js_name = deleteBody)]
    pub fn delete_body(&mut self, id: f64) -> bool {
        body_id(id).is_some_and(|id| self.inner.delete_body(id))
    }

    /// Move a body, keeping its velocity. Unknown IDs are ignored.
    ///
    /// # Returns
    /// true if the body exists
    #[wasm_bindgen(js_name = setBodyPosition)]
    pub fn set_body_position(&mut self, id: f64, x: f64, y: f64, z: f64) -> bool {
        body_id(id).is_some_and(|id| self.inner.set_body_position(id, Point3::new(x, y, z)))
    }

    /// Remove every body and flatten the fabric.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    // -------------------------------------------------------------------------
    // Simulation stepping
    // -------------------------------------------------------------------------

    /// Advance by a measured frame time.
    ///
    /// # Arguments
    /// * `dt` - Seconds since the last frame (clamped to the configured maximum)
    ///
    /// # Returns
    /// `{ dt, absorbed, escaped, bounces }`
    pub fn step(&mut self, dt: f64) -> Result<JsValue, JsError> {
        let report = self.inner.step(dt);
        to_js(&StepSnapshot::from(&report))
    }

    /// Advance by the configured fixed timestep.
    pub fn tick(&mut self) -> Result<JsValue, JsError> {
        let report = self.inner.tick();
        to_js(&StepSnapshot::from(&report))
    }

    /// Rebuild the fabric without stepping, e.g. while paused and dragging.
    #[wasm_bindgen(js_name = refreshFabric)]
    pub fn refresh_fabric(&mut self) {
        self.inner.refresh_fabric();
    }

    // -------------------------------------------------------------------------
    // State queries
    // -------------------------------------------------------------------------

    /// Get all bodies for rendering.
    #[wasm_bindgen(js_name = getBodies)]
    pub fn get_bodies(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.snapshots())
    }

    /// Get the fabric heights, row-major with x varying fastest.
    #[wasm_bindgen(js_name = getHeights)]
    pub fn get_heights(&self) -> Vec<f64> {
        self.inner.height_field().heights().to_vec()
    }

    /// Get the fabric vertices as a flat `[x, y, z, x, y, z, ...]` array.
    #[wasm_bindgen(js_name = getVertices)]
    pub fn get_vertices(&self) -> Vec<f64> {
        self.inner.height_field().vertices().flatten().collect()
    }

    /// Grid samples along one side of the fabric.
    #[wasm_bindgen(js_name = samplesPerAxis)]
    pub fn samples_per_axis(&self) -> usize {
        self.inner.fabric().samples_per_axis()
    }

    /// Side length of the fabric in world units.
    #[wasm_bindgen(js_name = gridSize)]
    pub fn grid_size(&self) -> f64 {
        self.inner.fabric().size()
    }

    /// Get complete simulation state snapshot.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsError> {
        let snapshot = SimulationSnapshot {
            time: self.inner.time(),
            steps: self.inner.steps(),
            bodies: self.inner.snapshots(),
            kinetic_energy: self.inner.store().kinetic_energy(),
            min_height: self.inner.height_field().min_height(),
        };
        to_js(&snapshot)
    }

    #[wasm_bindgen(js_name = bodyCount)]
    pub fn body_count(&self) -> usize {
        self.inner.body_count()
    }

    /// Simulated seconds since creation.
    pub fn time(&self) -> f64 {
        self.inner.time()
    }
}
