//! Interactive 3D viewer window
//!
//! Owns the display session: window, renderer, camera, and the blocking
//! winit event loop. Default controls: left-drag orbits, right-drag pans,
//! the scroll wheel zooms, and `r` resets the camera.

use std::sync::Arc;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::Key,
    window::WindowBuilder,
};

use crate::camera::OrbitCamera;
use vtpview_core::{Error, Result, VertexSet};
use vtpview_render::{vertex_set_to_vertices, PointCloudRenderer, RenderConfig};

/// Interactive viewer for a vertex set with an active scalar binding
pub struct Viewer {
    title: String,
    config: RenderConfig,
}

impl Viewer {
    /// Create a viewer with the given render configuration
    pub fn new(config: RenderConfig) -> Self {
        Self {
            title: "vtpview".to_string(),
            config,
        }
    }

    /// Override the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window and block until the user closes it.
    ///
    /// The mapper stage runs first, so a missing scalar binding fails before
    /// any window or GPU resource exists. Fails with
    /// `Error::DisplayUnavailable` when no window or adapter can be created
    /// (headless environment).
    pub fn run(self, set: &VertexSet<'_>) -> Result<()> {
        let vertices = vertex_set_to_vertices(set)?;
        let mut camera = OrbitCamera::framing(set.cloud().bounds());

        let event_loop = EventLoop::new().map_err(|e| {
            Error::DisplayUnavailable(format!("failed to create event loop: {}", e))
        })?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0))
                .build(&event_loop)
                .map_err(|e| {
                    Error::DisplayUnavailable(format!("failed to create window: {}", e))
                })?,
        );

        let mut renderer =
            pollster::block_on(PointCloudRenderer::new(window.clone(), self.config.clone()))?;
        renderer.upload_points(&vertices);
        log::info!(
            "window open, {} points colored by '{}'",
            vertices.len(),
            set.active_scalar_name().unwrap_or("<none>")
        );

        let size = window.inner_size();
        camera.aspect_ratio = size.width as f32 / size.height.max(1) as f32;

        // Initial render pass before the interaction loop starts
        renderer.update_camera(camera.view_matrix(), camera.projection_matrix());
        renderer.render()?;

        let mut last_mouse_pos: Option<PhysicalPosition<f64>> = None;
        let mut left_pressed = false;
        let mut right_pressed = false;

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                if let Event::WindowEvent { event, .. } = event {
                    match event {
                        WindowEvent::CloseRequested => {
                            target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            renderer.resize(new_size);
                            camera.aspect_ratio =
                                new_size.width as f32 / new_size.height.max(1) as f32;
                        }
                        WindowEvent::MouseInput { state, button, .. } => match button {
                            MouseButton::Left => left_pressed = state == ElementState::Pressed,
                            MouseButton::Right => right_pressed = state == ElementState::Pressed,
                            _ => {}
                        },
                        WindowEvent::CursorMoved { position, .. } => {
                            if let Some(last) = last_mouse_pos {
                                let dx = (position.x - last.x) as f32;
                                let dy = (position.y - last.y) as f32;
                                if left_pressed {
                                    camera.orbit(dx * 0.01, dy * 0.01);
                                } else if right_pressed {
                                    camera.pan(dx, dy);
                                }
                            }
                            last_mouse_pos = Some(position);
                        }
                        WindowEvent::MouseWheel { delta, .. } => {
                            let scroll = match delta {
                                MouseScrollDelta::LineDelta(_, y) => y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                            };
                            camera.zoom(scroll);
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.state == ElementState::Pressed {
                                if let Key::Character(c) = &event.logical_key {
                                    if matches!(c.as_str(), "r" | "R") {
                                        camera.reset();
                                    }
                                }
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            renderer
                                .update_camera(camera.view_matrix(), camera.projection_matrix());
                            if let Err(e) = renderer.render() {
                                log::error!("render error: {}", e);
                            }
                            window.request_redraw();
                        }
                        _ => {}
                    }
                }
            })
            .map_err(|e| Error::Render(format!("event loop error: {}", e)))?;

        log::info!("window closed");
        Ok(())
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
