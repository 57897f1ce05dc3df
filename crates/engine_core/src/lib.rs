//! Core engine types and utilities for the aim room.
//!
//! This crate provides the foundational types used across all systems:
//! - Transform for spatial positioning
//! - Frame time management
//! - Decaying scalars for timers, recoil, and flashes

pub mod decay;
pub mod time;
pub mod transform;

pub use decay::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
