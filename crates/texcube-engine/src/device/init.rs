/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB back buffer format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// `AutoNoVsync` falls back to FIFO where immediate/mailbox are missing.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Format of the depth buffer owned by the swap chain.
    pub depth_format: wgpu::TextureFormat,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Debug layer override. `None` uses the backend's default.
    pub validation: Option<bool>,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: None,
            depth_format: wgpu::TextureFormat::Depth32Float,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            validation: None,
            desired_maximum_frame_latency: 2,
        }
    }
}
