//! Space-time fabric simulation.
//!
//! Planets and black holes placed on a deformable grid attract each other,
//! bounce or get swallowed, drift out of bounds, and warp the grid beneath
//! them. [`simulation::Simulation`] is the entry point; everything else is
//! the machinery one step is built from.

pub mod body;
pub mod bounds;
pub mod collisions;
pub mod config;
pub mod error;
pub mod fabric;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod state;

pub use body::{Body, BodyId, BodyKind, BodySnapshot, SizeClass};
pub use config::SimulationConfig;
pub use error::ConfigError;
pub use simulation::{Simulation, StepReport};

#[cfg(test)]
mod simulation_test;
#[cfg(test)]
mod state_test;
