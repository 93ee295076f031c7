use winit::window::Window;

use crate::error::{Error, Result};

use super::{BackBuffer, Backend, GpuInit, SwapChain};

/// Device, immediate context (queue) and swap chain for one window.
///
/// The swap chain's surface borrows the window for `'w`, so the window must
/// outlive this value.
pub struct Gpu<'w> {
    /// Kept alive for the surface.
    _instance: wgpu::Instance,
    device: wgpu::Device,
    queue: wgpu::Queue,
    swap_chain: SwapChain<'w>,
}

impl<'w> Gpu<'w> {
    pub(crate) async fn new(backend: Backend, window: &'w Window, init: GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: backend.wgpu_backends(),
            flags: backend.instance_flags(init.validation),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| Error::ResourceCreation(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| Error::BackendUnavailable {
                backend,
                reason: e.to_string(),
            })?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("texcube device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| Error::ResourceCreation(format!("failed to create device: {e}")))?;

        let swap_chain = SwapChain::new(surface, &adapter, &device, window.inner_size(), &init)?;

        Ok(Self {
            _instance: instance,
            device,
            queue,
            swap_chain,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// The immediate context: all uploads and submissions go through it.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn swap_chain(&self) -> &SwapChain<'w> {
        &self.swap_chain
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.swap_chain.resize(&self.device, width, height);
    }

    pub fn acquire(&mut self) -> Result<Option<BackBuffer>> {
        self.swap_chain.acquire(&self.device)
    }
}
