//! Collision detection and resolution
//!
//! Detection finds overlapping pairs; resolution applies the contact rules
//! (black holes absorb planets, planets bounce elastically) and reports
//! which bodies must be removed. Removal itself is left to the caller so the
//! body list is never mutated while it is being walked.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod resolution_test;

pub use detection::{CollisionDetector, CollisionEvent, ContactKind, DirectDetector};
pub use resolution::{elastic_bounce, resolve_collisions, CollisionOutcome};
