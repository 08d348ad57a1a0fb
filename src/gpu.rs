use crate::error::InitError;

/// Handles to the hardware and the logical device used for every command.
pub struct Gpu {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

pub fn instance() -> wgpu::Instance {
    wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

/// Requests an adapter that can present to `surface`, then its device and queue.
///
/// Any failure here is final: the caller reports [`InitError::Unsupported`] and
/// never asks again.
pub async fn acquire(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface>,
) -> Result<Gpu, InitError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| {
            log::error!("no compatible graphics adapter");
            InitError::Unsupported
        })?;

    let info = adapter.get_info();
    log::info!("adapter: {} ({:?})", info.name, info.backend);

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("main device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default().using_resolution(adapter.limits()),
            },
            None,
        )
        .await
        .map_err(|err| {
            log::error!("device request failed: {}", err);
            InitError::Unsupported
        })?;

    Ok(Gpu {
        adapter,
        device,
        queue,
    })
}
