//! Core data structures for vtpview
//!
//! This crate provides the fundamental types for point-cloud visualization:
//! point clouds with named per-point scalar fields, vertex primitive sets,
//! and the active scalar binding that drives color mapping.

pub mod error;
pub mod point;
pub mod point_cloud;
pub mod vertex_set;

pub use error::*;
pub use point::*;
pub use point_cloud::*;
pub use vertex_set::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix4, Point3, Vector3};
