//! Simulation configuration.
//!
//! Everything tunable lives here: physical constants, the falloff model used
//! to warp the fabric, simulation bounds, frame timing and the size-class
//! table that gives each placed body its mass and radius. Every field has a
//! default, so a YAML file only needs to name what it overrides:
//!
//! ```yaml
//! gravity:
//!   g: 0.1              # gravitational constant
//!   cutoff: 10.0        # pairs farther apart than this feel nothing
//!   min_distance: 0.1   # distance floor used in 1/r²
//!
//! integrator: semi_implicit_euler   # or "leapfrog"
//!
//! bounds:
//!   floor: -10.0
//!   ceiling: 10.0
//!
//! fabric:
//!   size: 20.0
//!   divisions: 40
//!   falloff:
//!     gaussian:
//!       decay_rate: 0.25
//!       planet_depth: 0.6
//!       black_hole_depth: 2.0
//!
//! sizes:
//!   black_hole:           # a row must list all three classes
//!     small: { mass: 2.5, radius: 1.5 }
//!     medium: { mass: 7.5, radius: 2.0 }
//!     large: { mass: 20.0, radius: 3.0 }
//! ```
//!
//! ```
//! use spacetime::config::SimulationConfig;
//!
//! let config = SimulationConfig::from_yaml_str("gravity:\n  g: 0.2\n").unwrap();
//! assert_eq!(config.gravity.g, 0.2);
//! assert_eq!(config.gravity.cutoff, 10.0);
//! ```

use serde::Deserialize;

use crate::body::{BodyKind, SizeClass};
use crate::error::ConfigError;
use crate::fabric::FalloffModel;

/// Constants for pairwise attraction
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GravityConfig {
    pub g: f64,            // gravitational constant (world units)
    pub cutoff: f64,       // hard interaction cutoff; beyond it force is exactly zero
    pub min_distance: f64, // floor on r used in the 1/r² term
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            g: 0.1,
            cutoff: 10.0,
            min_distance: 0.1,
        }
    }
}

/// Which time integrator advances bodies each tick
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    /// Kick velocities, then drift positions with the new velocities
    #[default]
    SemiImplicitEuler,
    /// Kick-drift-kick leapfrog; two force evaluations per tick
    Leapfrog,
}

/// Vertical limits of the simulation volume
///
/// The horizontal limit is half the fabric side, so it lives on
/// [`FabricConfig`].
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BoundsConfig {
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            floor: -10.0,
            ceiling: 10.0,
        }
    }
}

/// Lattice shape and the falloff model used to warp it
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FabricConfig {
    pub size: f64,      // side of the square domain, centered on the origin
    pub divisions: u32, // subdivisions per axis; (divisions + 1)² samples
    pub falloff: FalloffModel,
}

impl Default for FabricConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            divisions: 40,
            falloff: FalloffModel::default(),
        }
    }
}

/// Frame timing
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TimeConfig {
    pub fixed_dt: f64, // used by `Simulation::tick`
    pub max_dt: f64,   // measured frame times are clamped to this
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_dt: 0.1,
        }
    }
}

/// Mass and radius assigned to a newly created body
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SizeSpec {
    pub mass: f64,
    pub radius: f64,
}

impl SizeSpec {
    pub const fn new(mass: f64, radius: f64) -> Self {
        Self { mass, radius }
    }
}

/// One row of the size table: the three size classes of a body kind
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SizeRow {
    pub small: SizeSpec,
    pub medium: SizeSpec,
    pub large: SizeSpec,
}

impl SizeRow {
    pub fn get(&self, class: SizeClass) -> SizeSpec {
        match class {
            SizeClass::Small => self.small,
            SizeClass::Medium => self.medium,
            SizeClass::Large => self.large,
        }
    }

    fn specs(&self) -> [SizeSpec; 3] {
        [self.small, self.medium, self.large]
    }
}

/// Size-class table for every body kind
///
/// Black holes weigh five times the planet of the same class.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SizeTable {
    pub planet: SizeRow,
    pub black_hole: SizeRow,
}

impl Default for SizeTable {
    fn default() -> Self {
        Self {
            planet: SizeRow {
                small: SizeSpec::new(0.5, 0.5),
                medium: SizeSpec::new(1.5, 0.8),
                large: SizeSpec::new(3.0, 1.2),
            },
            black_hole: SizeRow {
                small: SizeSpec::new(2.5, 1.5),
                medium: SizeSpec::new(7.5, 2.0),
                large: SizeSpec::new(15.0, 2.5),
            },
        }
    }
}

impl SizeTable {
    /// Looks up the mass and radius for a kind and size class
    ///
    /// ```
    /// use spacetime::body::{BodyKind, SizeClass};
    /// use spacetime::config::SizeTable;
    ///
    /// let table = SizeTable::default();
    /// let spec = table.get(BodyKind::BlackHole, SizeClass::Medium);
    /// assert_eq!(spec.mass, 7.5);
    /// assert_eq!(spec.radius, 2.0);
    /// ```
    pub fn get(&self, kind: BodyKind, class: SizeClass) -> SizeSpec {
        let row = match kind {
            BodyKind::Planet => &self.planet,
            BodyKind::BlackHole => &self.black_hole,
        };
        row.get(class)
    }
}

/// Top-level configuration, supplied once when a simulation is created
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub gravity: GravityConfig,
    pub integrator: IntegratorKind,
    pub bounds: BoundsConfig,
    pub fabric: FabricConfig,
    pub time: TimeConfig,
    pub sizes: SizeTable,
}

impl SimulationConfig {
    /// Parses and validates a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a configuration from any reader
    pub fn from_yaml_reader<R: std::io::Read>(reader: R) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Half the fabric side; bodies farther than this from the vertical axis
    /// have left the simulation
    pub fn horizontal_limit(&self) -> f64 {
        self.fabric.size / 2.0
    }

    /// Checks every constant the simulation divides by or scales with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravity.g", self.gravity.g)?;
        positive("gravity.cutoff", self.gravity.cutoff)?;
        positive("gravity.min_distance", self.gravity.min_distance)?;
        positive("fabric.size", self.fabric.size)?;
        positive("time.fixed_dt", self.time.fixed_dt)?;
        positive("time.max_dt", self.time.max_dt)?;

        if self.fabric.divisions == 0 {
            return Err(ConfigError::ZeroDivisions);
        }

        let BoundsConfig { floor, ceiling } = self.bounds;
        if !floor.is_finite() || !ceiling.is_finite() || floor >= ceiling {
            return Err(ConfigError::InvertedBounds { floor, ceiling });
        }

        match self.fabric.falloff {
            FalloffModel::Gaussian {
                decay_rate,
                planet_depth,
                black_hole_depth,
            } => {
                positive("fabric.falloff.decay_rate", decay_rate)?;
                positive("fabric.falloff.planet_depth", planet_depth)?;
                positive("fabric.falloff.black_hole_depth", black_hole_depth)?;
            }
            FalloffModel::Inverse {
                k,
                epsilon,
                cutoff_factor,
            } => {
                positive("fabric.falloff.k", k)?;
                positive("fabric.falloff.epsilon", epsilon)?;
                positive("fabric.falloff.cutoff_factor", cutoff_factor)?;
            }
        }

        for spec in self
            .sizes
            .planet
            .specs()
            .iter()
            .chain(self.sizes.black_hole.specs().iter())
        {
            positive("sizes.mass", spec.mass)?;
            positive("sizes.radius", spec.radius)?;
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
