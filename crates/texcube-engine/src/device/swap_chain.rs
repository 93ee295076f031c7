use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;

use crate::error::{Error, Result};

use super::GpuInit;

/// Live description of the swap chain.
///
/// `width`/`height` are the last requested size and may be zero while the
/// window is minimized; the formats never change after creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
}

impl SwapChainDesc {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigure,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM).
    Fatal,
}

impl SurfaceErrorAction {
    pub fn for_error(err: &SurfaceError) -> Self {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigure,
            SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
            SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        }
    }
}

/// Back buffer acquired for one frame.
///
/// Holding it blocks acquisition of the next one; call [`BackBuffer::present`]
/// once the frame's commands are submitted.
pub struct BackBuffer {
    surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
}

impl BackBuffer {
    pub fn present(self) {
        self.surface_texture.present();
    }
}

/// Presentation surface plus the depth buffer that matches it.
pub struct SwapChain<'w> {
    /// Lifetime tied to the window the surface was created from.
    surface: wgpu::Surface<'w>,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth_format: wgpu::TextureFormat,
    depth_view: wgpu::TextureView,
}

impl<'w> SwapChain<'w> {
    pub(crate) fn new(
        surface: wgpu::Surface<'w>,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        size: PhysicalSize<u32>,
        init: &GpuInit,
    ) -> Result<Self> {
        let caps = surface.get_capabilities(adapter);
        let format = choose_surface_format(&caps, init.prefer_srgb).ok_or_else(|| {
            Error::ResourceCreation("surface reports no supported formats".to_string())
        })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode: choose_alpha_mode(&caps, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        surface.configure(device, &config);
        let depth_view = create_depth_view(device, &config, init.depth_format);

        log::info!(
            "swap chain {}x{} color {:?} depth {:?} present {:?}",
            config.width,
            config.height,
            config.format,
            init.depth_format,
            config.present_mode
        );

        Ok(Self {
            surface,
            config,
            size,
            depth_format: init.depth_format,
            depth_view,
        })
    }

    pub fn desc(&self) -> SwapChainDesc {
        SwapChainDesc {
            width: self.size.width,
            height: self.size.height,
            color_format: self.config.format,
            depth_format: self.depth_format,
        }
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Records the new size; the surface and depth buffer are only rebuilt
    /// for non-zero sizes since wgpu cannot configure an empty surface.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.size = PhysicalSize::new(width, height);
        if width == 0 || height == 0 {
            log::debug!("swap chain resize to {width}x{height} deferred");
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(device, &self.config);
        self.depth_view = create_depth_view(device, &self.config, self.depth_format);
    }

    /// Acquires the next back buffer.
    ///
    /// `Ok(None)` means the frame should be skipped; recoverable surface
    /// errors are handled here and only fatal ones are returned.
    pub fn acquire(&mut self, device: &wgpu::Device) -> Result<Option<BackBuffer>> {
        match self.surface.get_current_texture() {
            Ok(surface_texture) => {
                let view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Ok(Some(BackBuffer {
                    surface_texture,
                    view,
                }))
            }
            Err(err) => match SurfaceErrorAction::for_error(&err) {
                SurfaceErrorAction::Reconfigure => {
                    log::debug!("surface {err}, reconfiguring");
                    if self.size.width > 0 && self.size.height > 0 {
                        self.surface.configure(device, &self.config);
                    }
                    Ok(None)
                }
                SurfaceErrorAction::SkipFrame => {
                    log::debug!("surface {err}, skipping frame");
                    Ok(None)
                }
                SurfaceErrorAction::Fatal => Err(Error::Surface(err.to_string())),
            },
        }
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    format: wgpu::TextureFormat,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth buffer"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    pick_format(&caps.formats, prefer_srgb)
}

fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    }

    formats.first().copied()
}

fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}
