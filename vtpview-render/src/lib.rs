//! wgpu rendering for vtpview
//!
//! This crate provides the geometry-to-screen stages of the pipeline: the
//! scalar colormap, the mapping from a bound vertex set to renderable point
//! instances, and the wgpu point-sprite renderer itself.

pub mod colormap;
pub mod device;
pub mod renderer;

pub use device::GpuContext;
pub use renderer::{vertex_set_to_vertices, PointCloudRenderer, PointVertex, RenderConfig};
