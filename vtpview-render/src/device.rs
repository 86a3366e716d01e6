//! GPU device management

use vtpview_core::{Error, Result};

/// GPU context for rendering operations
pub struct GpuContext {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Acquire an adapter and device compatible with the given surface.
    ///
    /// Fails with `Error::DisplayUnavailable` when no usable adapter exists,
    /// which is what a headless environment looks like from here.
    pub async fn for_surface(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<Self> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| {
                Error::DisplayUnavailable("no compatible graphics adapter found".to_string())
            })?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("vtpview Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| {
                Error::DisplayUnavailable(format!("failed to create device: {}", e))
            })?;

        log::debug!("using adapter: {}", adapter.get_info().name);

        Ok(Self {
            adapter,
            device,
            queue,
        })
    }
}
