//! Interactive windowing for vtpview
//!
//! This crate provides the display session: an orbit camera and a blocking
//! winit viewer that renders a vertex set through `vtpview-render`.

pub mod camera;
pub mod viewer;

pub use camera::OrbitCamera;
pub use viewer::Viewer;

use vtpview_core::{Result, VertexSet};
use vtpview_render::RenderConfig;

/// Show a vertex set in an interactive viewer, blocking until it is closed
pub fn show(set: &VertexSet<'_>, config: RenderConfig) -> Result<()> {
    Viewer::new(config).run(set)
}
