use std::fmt;
use std::str::FromStr;

use winit::window::Window;

use crate::error::{Error, Result};

use super::{Gpu, GpuInit};

/// Graphics API requested on the command line.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Backend {
    #[default]
    D3D11,
    D3D12,
    VK,
    GL,
}

impl Backend {
    pub const ALL: [Backend; 4] = [Backend::D3D11, Backend::D3D12, Backend::VK, Backend::GL];

    /// Command-line spelling.
    pub fn name(self) -> &'static str {
        match self {
            Backend::D3D11 => "d3d11",
            Backend::D3D12 => "d3d12",
            Backend::VK => "vk",
            Backend::GL => "gl",
        }
    }

    /// Human-readable API name, used in the window title.
    pub fn api_name(self) -> &'static str {
        match self {
            Backend::D3D11 => "Direct3D11",
            Backend::D3D12 => "Direct3D12",
            Backend::VK => "Vulkan",
            Backend::GL => "OpenGL",
        }
    }

    /// wgpu backend set used to look for an adapter.
    ///
    /// wgpu has no Direct3D 11 implementation; D3D11 requests run on DX12.
    pub fn wgpu_backends(self) -> wgpu::Backends {
        match self {
            Backend::D3D11 | Backend::D3D12 => wgpu::Backends::DX12,
            Backend::VK => wgpu::Backends::VULKAN,
            Backend::GL => wgpu::Backends::GL,
        }
    }

    /// Whether the debug layer is on when `GpuInit::validation` is unset.
    pub fn validation_by_default(self) -> bool {
        !matches!(self, Backend::VK)
    }

    pub(crate) fn instance_flags(self, validation: Option<bool>) -> wgpu::InstanceFlags {
        if validation.unwrap_or_else(|| self.validation_by_default()) {
            wgpu::InstanceFlags::VALIDATION | wgpu::InstanceFlags::DEBUG
        } else {
            wgpu::InstanceFlags::empty()
        }
    }

    /// Creates the device, its immediate queue and a swap chain bound to `window`.
    ///
    /// Blocks on adapter and device requests.
    pub fn create_device_context_and_swap_chain<'w>(
        self,
        window: &'w Window,
        init: GpuInit,
    ) -> Result<Gpu<'w>> {
        if self == Backend::D3D11 {
            log::warn!("Direct3D11 is not available through wgpu, running on Direct3D12");
        }
        pollster::block_on(Gpu::new(self, window, init))
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Backend::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::BackendSelection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!("d3d11".parse::<Backend>().unwrap(), Backend::D3D11);
        assert_eq!("D3D12".parse::<Backend>().unwrap(), Backend::D3D12);
        assert_eq!("Vk".parse::<Backend>().unwrap(), Backend::VK);
        assert_eq!("GL".parse::<Backend>().unwrap(), Backend::GL);
    }

    #[test]
    fn rejects_unknown_names() {
        for bad in ["", "metal", "d3d", "vulkan", " gl"] {
            match bad.parse::<Backend>() {
                Err(Error::BackendSelection(s)) => assert_eq!(s, bad),
                other => panic!("{bad:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn display_round_trips() {
        for b in Backend::ALL {
            assert_eq!(b.to_string().parse::<Backend>().unwrap(), b);
        }
    }

    #[test]
    fn default_is_d3d11() {
        assert_eq!(Backend::default(), Backend::D3D11);
    }

    #[test]
    fn maps_onto_wgpu_backends() {
        assert_eq!(Backend::D3D11.wgpu_backends(), wgpu::Backends::DX12);
        assert_eq!(Backend::D3D12.wgpu_backends(), wgpu::Backends::DX12);
        assert_eq!(Backend::VK.wgpu_backends(), wgpu::Backends::VULKAN);
        assert_eq!(Backend::GL.wgpu_backends(), wgpu::Backends::GL);
    }

    #[test]
    fn validation_defaults_and_override() {
        let on = wgpu::InstanceFlags::VALIDATION | wgpu::InstanceFlags::DEBUG;
        assert_eq!(Backend::D3D12.instance_flags(None), on);
        assert_eq!(Backend::GL.instance_flags(None), on);
        assert_eq!(Backend::VK.instance_flags(None), wgpu::InstanceFlags::empty());
        assert_eq!(Backend::VK.instance_flags(Some(true)), on);
        assert_eq!(Backend::D3D11.instance_flags(Some(false)), wgpu::InstanceFlags::empty());
    }

    #[test]
    fn api_names() {
        let names: Vec<_> = Backend::ALL.iter().map(|b| b.api_name()).collect();
        assert_eq!(names, ["Direct3D11", "Direct3D12", "Vulkan", "OpenGL"]);
    }
}
