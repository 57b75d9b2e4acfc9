//! The deformable space-time fabric
//!
//! A fixed square lattice of sample points in the x/z plane, centered on the
//! origin. Each tick the height of every sample is rebuilt from scratch by
//! summing a falloff contribution from every body, so heavier bodies dig
//! deeper and wider wells and black holes dig deeper than planets.
//!
//! # Examples
//!
//! ```
//! use spacetime::fabric::{Fabric, FalloffModel};
//!
//! let fabric = Fabric::new(20.0, 4);
//! assert_eq!(fabric.sample_count(), 25);
//! assert_eq!(fabric.vertex(0, 0), [-10.0, 0.0, -10.0]);
//! assert_eq!(fabric.vertex(4, 4), [10.0, 0.0, 10.0]);
//! ```

use serde::Deserialize;

use crate::body::{Body, BodyKind};

/// How a single body's mass depresses the fabric with distance
///
/// Both models are negative everywhere they apply and shrink in magnitude
/// as horizontal distance grows.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FalloffModel {
    /// `-mass · depth(kind) · exp(-d² · decay_rate)`
    ///
    /// Unbounded support, strictly monotone in distance.
    Gaussian {
        decay_rate: f64,
        planet_depth: f64,
        black_hole_depth: f64,
    },
    /// `-(mass · k) / (d + epsilon)` for `d < mass · cutoff_factor`, else 0
    ///
    /// Black holes use twice their mass when scaling the depth.
    Inverse {
        k: f64,
        epsilon: f64,
        cutoff_factor: f64,
    },
}

impl Default for FalloffModel {
    fn default() -> Self {
        FalloffModel::Gaussian {
            decay_rate: 0.25,
            planet_depth: 0.6,
            black_hole_depth: 2.0,
        }
    }
}

impl FalloffModel {
    /// Height contribution of `body` at horizontal distance `distance`
    ///
    /// ```
    /// use spacetime::fabric::FalloffModel;
    /// use spacetime::body::BodyKind;
    ///
    /// let model = FalloffModel::default();
    /// let near = model.contribution(BodyKind::Planet, 1.5, 0.5);
    /// let far = model.contribution(BodyKind::Planet, 1.5, 2.0);
    /// assert!(near < far && far < 0.0);
    /// ```
    pub fn contribution(&self, kind: BodyKind, mass: f64, distance: f64) -> f64 {
        match *self {
            FalloffModel::Gaussian {
                decay_rate,
                planet_depth,
                black_hole_depth,
            } => {
                let depth = match kind {
                    BodyKind::Planet => planet_depth,
                    BodyKind::BlackHole => black_hole_depth,
                };
                -mass * depth * (-distance * distance * decay_rate).exp()
            }
            FalloffModel::Inverse {
                k,
                epsilon,
                cutoff_factor,
            } => {
                if distance >= mass * cutoff_factor {
                    return 0.0;
                }
                let weight = match kind {
                    BodyKind::Planet => 1.0,
                    BodyKind::BlackHole => 2.0,
                };
                -(mass * weight * k) / (distance + epsilon)
            }
        }
    }
}

/// Square lattice of height samples
///
/// Topology (`size`, `divisions`, base x/z) is fixed at construction; only
/// heights change. Samples are stored row-major with x varying fastest:
/// index = `iz * (divisions + 1) + ix`.
#[derive(Debug, Clone)]
pub struct Fabric {
    size: f64,
    divisions: u32,
    /// Base x (and z) coordinate of each lattice column (and row)
    axis: Vec<f64>,
    heights: Vec<f64>,
}

impl Fabric {
    /// Builds a flat lattice of `(divisions + 1)²` samples spanning
    /// `[-size/2, size/2]` on both axes
    pub fn new(size: f64, divisions: u32) -> Self {
        let per_axis = divisions as usize + 1;
        let half = size / 2.0;
        let step = size / divisions as f64;

        let axis: Vec<f64> = (0..per_axis).map(|i| -half + i as f64 * step).collect();

        Self {
            size,
            divisions,
            axis,
            heights: vec![0.0; per_axis * per_axis],
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Samples along one axis
    pub fn samples_per_axis(&self) -> usize {
        self.axis.len()
    }

    pub fn sample_count(&self) -> usize {
        self.heights.len()
    }

    /// Spacing between neighbouring samples
    pub fn spacing(&self) -> f64 {
        self.size / self.divisions as f64
    }

    fn index(&self, ix: usize, iz: usize) -> Option<usize> {
        let n = self.axis.len();
        (ix < n && iz < n).then(|| iz * n + ix)
    }

    /// Height of the sample at column `ix`, row `iz`
    pub fn height_at(&self, ix: usize, iz: usize) -> Option<f64> {
        self.index(ix, iz).map(|i| self.heights[i])
    }

    /// World-space `[x, y, z]` of a sample; out-of-range indices clamp to
    /// the lattice edge
    pub fn vertex(&self, ix: usize, iz: usize) -> [f64; 3] {
        let last = self.axis.len() - 1;
        let (ix, iz) = (ix.min(last), iz.min(last));
        [self.axis[ix], self.heights[iz * self.axis.len() + ix], self.axis[iz]]
    }

    /// Read-only view for renderers
    pub fn height_field(&self) -> HeightField<'_> {
        HeightField { fabric: self }
    }

    /// Resets every sample to zero height
    pub fn flatten(&mut self) {
        self.heights.fill(0.0);
    }

    /// Rebuilds every height from the current bodies
    ///
    /// O(samples × bodies). With no bodies the fabric ends up flat.
    pub fn recompute(&mut self, bodies: &[Body], model: &FalloffModel) {
        let n = self.axis.len();
        let axis = &self.axis;

        self.heights
            .iter_mut()
            .enumerate()
            .for_each(|(i, height)| {
                let x = axis[i % n];
                let z = axis[i / n];
                *height = bodies
                    .iter()
                    .map(|b| model.contribution(b.kind, b.mass, b.horizontal_distance_to(x, z)))
                    .sum();
            });
    }
}

/// Borrowed view of the fabric's heights
#[derive(Debug, Clone, Copy)]
pub struct HeightField<'a> {
    fabric: &'a Fabric,
}

impl<'a> HeightField<'a> {
    /// Row-major heights, x varying fastest
    pub fn heights(&self) -> &'a [f64] {
        &self.fabric.heights
    }

    pub fn samples_per_axis(&self) -> usize {
        self.fabric.samples_per_axis()
    }

    pub fn height_at(&self, ix: usize, iz: usize) -> Option<f64> {
        self.fabric.height_at(ix, iz)
    }

    /// Deepest point of the fabric (most negative height), or 0 when flat
    pub fn min_height(&self) -> f64 {
        self.heights().iter().copied().fold(0.0, f64::min)
    }

    pub fn is_flat(&self) -> bool {
        self.heights().iter().all(|&h| h == 0.0)
    }

    /// Iterates `[x, y, z]` vertices in storage order
    pub fn vertices(&self) -> impl Iterator<Item = [f64; 3]> + 'a {
        let fabric = self.fabric;
        let n = fabric.axis.len();
        (0..fabric.heights.len()).map(move |i| fabric.vertex(i % n, i / n))
    }
}
