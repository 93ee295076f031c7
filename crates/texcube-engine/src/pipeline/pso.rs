use std::num::NonZeroU64;

use crate::cube::{Constants, Vertex};
use crate::device::SwapChainDesc;
use crate::error::{Error, Result};

use super::shaders::ENTRY_POINT;
use super::{ShaderResourceLayout, ShaderSet, ShaderStage, VariableType};

const CONSTANTS_BINDING: u32 = 0;
const TEXTURE_BINDING: u32 = 0;
const SAMPLER_BINDING: u32 = 1;

/// Per-instance resource table: the mutable variables of [`CubePipeline`].
///
/// Created once, after which only the pipeline's static constants change.
pub struct ResourceBinding {
    bind_group: wgpu::BindGroup,
}

/// Pipeline state for the textured cube.
///
/// Immutable after creation. The static `Constants` variable is bound here,
/// once; the mutable `g_Texture` goes through [`ResourceBinding`].
pub struct CubePipeline {
    pipeline: wgpu::RenderPipeline,
    static_bind_group: wgpu::BindGroup,
    mutable_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl CubePipeline {
    /// Builds the pipeline against the live swap chain's formats and binds
    /// `constants` as the vertex-stage uniform block.
    pub fn new(
        device: &wgpu::Device,
        shaders: &ShaderSet,
        targets: &SwapChainDesc,
        constants: &wgpu::Buffer,
    ) -> Result<Self> {
        let resource_layout = ShaderResourceLayout::textured_cube();

        let texture_var = resource_layout
            .mutable_variables()
            .find(|v| v.name == ShaderResourceLayout::TEXTURE)
            .cloned()
            .ok_or_else(|| Error::ResourceCreation("g_Texture is not a mutable variable".into()))?;
        let sampler_desc = resource_layout
            .immutable_sampler(texture_var.stage, texture_var.name)
            .copied()
            .ok_or_else(|| Error::ResourceCreation("g_Texture has no immutable sampler".into()))?;

        let constants_type =
            resource_layout.variable_type(ShaderStage::Vertex, ShaderResourceLayout::CONSTANTS);
        if constants_type.bind_group() != 0 || texture_var.ty.bind_group() != 1 {
            return Err(Error::ResourceCreation(format!(
                "shader bind groups expect static constants in group 0 and mutable textures in group 1, got {} and {}",
                constants_type.bind_group(),
                texture_var.ty.bind_group()
            )));
        }

        let static_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cube static variables"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: CONSTANTS_BINDING,
                visibility: ShaderStage::Vertex.visibility(),
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<Constants>() as u64),
                },
                count: None,
            }],
        });

        let mutable_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cube mutable variables"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: TEXTURE_BINDING,
                    visibility: texture_var.stage.visibility(),
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: SAMPLER_BINDING,
                    visibility: texture_var.stage.visibility(),
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube PSO layout"),
            bind_group_layouts: &[&static_layout, &mutable_layout],
            immediate_size: 0,
        });

        let vs = shaders.vertex.create_module(device);
        let ps = shaders.pixel.create_module(device);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cube PSO"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(ENTRY_POINT),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &ps,
                entry_point: Some(ENTRY_POINT),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: targets.color_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Cube triangles are clockwise seen from outside.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: targets.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let static_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube static bindings"),
            layout: &static_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: CONSTANTS_BINDING,
                resource: constants.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&sampler_desc.to_wgpu("g_Texture sampler"));

        log::debug!(
            "created cube PSO (color {:?}, depth {:?})",
            targets.color_format,
            targets.depth_format
        );

        Ok(Self {
            pipeline,
            static_bind_group,
            mutable_layout,
            sampler,
        })
    }

    /// Creates the resource binding with `texture_view` in the `g_Texture` slot.
    ///
    /// The sampler is the pipeline's immutable one and cannot be replaced.
    pub fn create_resource_binding(
        &self,
        device: &wgpu::Device,
        texture_view: &wgpu::TextureView,
    ) -> ResourceBinding {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube resource binding"),
            layout: &self.mutable_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        ResourceBinding { bind_group }
    }

    /// Sets the pipeline and commits both bind groups on `pass`.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>, binding: &ResourceBinding) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(VariableType::Static.bind_group(), &self.static_bind_group, &[]);
        pass.set_bind_group(VariableType::Mutable.bind_group(), &binding.bind_group, &[]);
    }
}
