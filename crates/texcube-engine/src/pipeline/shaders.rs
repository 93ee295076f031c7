use std::path::Path;

use crate::error::{Error, Result};

use super::ShaderStage;

/// Entry point every shader file must define.
pub const ENTRY_POINT: &str = "main";

/// WGSL source for one stage, checked by naga.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub label: String,
    pub code: String,
}

impl ShaderSource {
    /// Parses and validates `code`; errors carry the rendered naga diagnostic.
    pub fn new(stage: ShaderStage, label: impl Into<String>, code: impl Into<String>) -> Result<Self> {
        let source = Self {
            stage,
            label: label.into(),
            code: code.into(),
        };
        source.validate()?;
        Ok(source)
    }

    pub fn from_file(stage: ShaderStage, path: &Path) -> Result<Self> {
        let code = std::fs::read_to_string(path).map_err(|e| {
            Error::ResourceCreation(format!("failed to read shader {}: {e}", path.display()))
        })?;
        Self::new(stage, path.display().to_string(), code)
    }

    fn validate(&self) -> Result<()> {
        let module = naga::front::wgsl::parse_str(&self.code).map_err(|e| {
            Error::ResourceCreation(format!(
                "failed to compile {}:\n{}",
                self.label,
                e.emit_to_string(&self.code)
            ))
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .map_err(|e| {
            Error::ResourceCreation(format!(
                "failed to validate {}:\n{}",
                self.label,
                e.emit_to_string(&self.code)
            ))
        })?;

        let stage = match self.stage {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Pixel => naga::ShaderStage::Fragment,
        };
        if !module
            .entry_points
            .iter()
            .any(|ep| ep.name == ENTRY_POINT && ep.stage == stage)
        {
            return Err(Error::ResourceCreation(format!(
                "{} has no {:?} entry point `{ENTRY_POINT}`",
                self.label, self.stage
            )));
        }

        Ok(())
    }

    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.label),
            source: wgpu::ShaderSource::Wgsl(self.code.as_str().into()),
        })
    }
}

/// Vertex + pixel shader pair consumed by the pipeline.
#[derive(Debug, Clone)]
pub struct ShaderSet {
    pub vertex: ShaderSource,
    pub pixel: ShaderSource,
}

impl ShaderSet {
    pub fn load(vertex: &Path, pixel: &Path) -> Result<Self> {
        log::debug!("loading shaders {} / {}", vertex.display(), pixel.display());
        Ok(Self {
            vertex: ShaderSource::from_file(ShaderStage::Vertex, vertex)?,
            pixel: ShaderSource::from_file(ShaderStage::Pixel, pixel)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED_VS: &str = include_str!("../../../texcube-tutorial/assets/cube.vsh.wgsl");
    const SHIPPED_PS: &str = include_str!("../../../texcube-tutorial/assets/cube.psh.wgsl");

    #[test]
    fn shipped_shaders_validate() {
        ShaderSource::new(ShaderStage::Vertex, "cube.vsh", SHIPPED_VS).unwrap();
        ShaderSource::new(ShaderStage::Pixel, "cube.psh", SHIPPED_PS).unwrap();
    }

    #[test]
    fn shipped_shaders_match_bind_group_layout() {
        assert!(SHIPPED_VS.contains("@group(0) @binding(0)"));
        assert!(SHIPPED_PS.contains("@group(1) @binding(0)"));
        assert!(SHIPPED_PS.contains("@group(1) @binding(1)"));
        assert!(SHIPPED_PS.contains("g_Texture"));
    }

    #[test]
    fn stage_must_match_entry_point() {
        let err = ShaderSource::new(ShaderStage::Pixel, "vs-as-ps", SHIPPED_VS).unwrap_err();
        assert!(matches!(err, Error::ResourceCreation(ref m) if m.contains("entry point")), "{err}");
    }

    #[test]
    fn compile_errors_are_resource_errors() {
        let err = ShaderSource::new(ShaderStage::Vertex, "broken", "fn main( {").unwrap_err();
        match err {
            Error::ResourceCreation(msg) => assert!(msg.contains("broken"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let (vs, ps) = (dir.path().join("a.wgsl"), dir.path().join("b.wgsl"));
        assert!(matches!(ShaderSet::load(&vs, &ps), Err(Error::ResourceCreation(_))));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let (vs, ps) = (dir.path().join("a.wgsl"), dir.path().join("b.wgsl"));
        std::fs::write(&vs, SHIPPED_VS).unwrap();
        std::fs::write(&ps, SHIPPED_PS).unwrap();
        let set = ShaderSet::load(&vs, &ps).unwrap();
        assert_eq!(set.vertex.stage, ShaderStage::Vertex);
        assert_eq!(set.pixel.stage, ShaderStage::Pixel);
    }
}
