//! Hit-scan ray queries for the aim room.
//!
//! Geometry tests run on parry shapes re-exported by Rapier3D; no physics
//! world is stepped.

pub mod raycast;

pub use raycast::*;

// Re-export Rapier for downstream crates
pub use rapier3d;
