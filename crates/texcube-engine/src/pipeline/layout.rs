/// Shader stage a resource variable is visible to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Pixel,
}

impl ShaderStage {
    pub fn visibility(self) -> wgpu::ShaderStages {
        match self {
            ShaderStage::Vertex => wgpu::ShaderStages::VERTEX,
            ShaderStage::Pixel => wgpu::ShaderStages::FRAGMENT,
        }
    }
}

/// How often a shader variable may be rebound.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VariableType {
    /// Bound once through the pipeline; shared by every resource binding.
    Static,
    /// Bound once per resource binding.
    Mutable,
}

impl VariableType {
    /// Bind group that holds variables of this type.
    pub fn bind_group(self) -> u32 {
        match self {
            VariableType::Static => 0,
            VariableType::Mutable => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderVariable {
    pub stage: ShaderStage,
    pub name: &'static str,
    pub ty: VariableType,
}

/// Sampler state baked into the pipeline layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SamplerDesc {
    pub min_filter: wgpu::FilterMode,
    pub mag_filter: wgpu::FilterMode,
    pub mip_filter: wgpu::MipmapFilterMode,
    pub address_u: wgpu::AddressMode,
    pub address_v: wgpu::AddressMode,
    pub address_w: wgpu::AddressMode,
}

impl SamplerDesc {
    /// Linear filtering, clamp-to-edge on every axis.
    pub const LINEAR_CLAMP: SamplerDesc = SamplerDesc {
        min_filter: wgpu::FilterMode::Linear,
        mag_filter: wgpu::FilterMode::Linear,
        mip_filter: wgpu::MipmapFilterMode::Linear,
        address_u: wgpu::AddressMode::ClampToEdge,
        address_v: wgpu::AddressMode::ClampToEdge,
        address_w: wgpu::AddressMode::ClampToEdge,
    };

    pub fn to_wgpu<'a>(&self, label: &'a str) -> wgpu::SamplerDescriptor<'a> {
        wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: self.address_u,
            address_mode_v: self.address_v,
            address_mode_w: self.address_w,
            mag_filter: self.mag_filter,
            min_filter: self.min_filter,
            mipmap_filter: self.mip_filter,
            ..Default::default()
        }
    }
}

/// Sampler permanently attached to a texture variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableSampler {
    pub stage: ShaderStage,
    pub texture_name: &'static str,
    pub desc: SamplerDesc,
}

/// Which shader variables are static vs. mutable and which samplers are fixed.
///
/// Variables not listed explicitly get `default_variable_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderResourceLayout {
    pub default_variable_type: VariableType,
    pub variables: Vec<ShaderVariable>,
    pub immutable_samplers: Vec<ImmutableSampler>,
}

impl ShaderResourceLayout {
    pub const CONSTANTS: &'static str = "Constants";
    pub const TEXTURE: &'static str = "g_Texture";

    /// Layout of the textured cube: the pixel-stage texture changes per
    /// binding, the vertex constants are static.
    pub fn textured_cube() -> Self {
        Self {
            default_variable_type: VariableType::Static,
            variables: vec![ShaderVariable {
                stage: ShaderStage::Pixel,
                name: Self::TEXTURE,
                ty: VariableType::Mutable,
            }],
            immutable_samplers: vec![ImmutableSampler {
                stage: ShaderStage::Pixel,
                texture_name: Self::TEXTURE,
                desc: SamplerDesc::LINEAR_CLAMP,
            }],
        }
    }

    pub fn variable_type(&self, stage: ShaderStage, name: &str) -> VariableType {
        self.variables
            .iter()
            .find(|v| v.stage == stage && v.name == name)
            .map_or(self.default_variable_type, |v| v.ty)
    }

    pub fn mutable_variables(&self) -> impl Iterator<Item = &ShaderVariable> {
        self.variables.iter().filter(|v| v.ty == VariableType::Mutable)
    }

    pub fn immutable_sampler(&self, stage: ShaderStage, texture_name: &str) -> Option<&SamplerDesc> {
        self.immutable_samplers
            .iter()
            .find(|s| s.stage == stage && s.texture_name == texture_name)
            .map(|s| &s.desc)
    }
}
