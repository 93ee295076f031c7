use crate::assets::AssetPaths;
use crate::cube::{Constants, CubeBuffers, INDEX_FORMAT};
use crate::device::{BackBuffer, Gpu, SwapChainDesc};
use crate::error::Result;
use crate::math::{DepthConvention, Mat4};
use crate::pipeline::{CubePipeline, ResourceBinding, ShaderSet};
use crate::texture::{load_texture, LoadedTexture};

use super::{DrawPass, FrameDevice, FrameStatus};

struct InFlightFrame {
    back_buffer: BackBuffer,
    encoder: wgpu::CommandEncoder,
}

/// wgpu implementation of [`FrameDevice`]: owns the GPU and every static
/// resource the cube needs.
pub struct GpuFrameDevice<'w> {
    gpu: Gpu<'w>,
    buffers: CubeBuffers,
    pipeline: CubePipeline,
    /// Referenced by `binding`.
    _texture: LoadedTexture,
    binding: ResourceBinding,
    frame: Option<InFlightFrame>,
}

impl<'w> GpuFrameDevice<'w> {
    /// Creates buffers, pipeline, texture and resource binding.
    ///
    /// The pipeline is built after the swap chain so it can use its formats.
    pub fn new(gpu: Gpu<'w>, assets: &AssetPaths) -> Result<Self> {
        let device = gpu.device();

        let buffers = CubeBuffers::new(device);
        let shaders = ShaderSet::load(&assets.vertex_shader, &assets.pixel_shader)?;
        let pipeline = CubePipeline::new(device, &shaders, &gpu.swap_chain().desc(), &buffers.constants)?;

        let texture = load_texture(device, gpu.queue(), &assets.texture)?;
        let binding = pipeline.create_resource_binding(device, &texture.view);

        log::info!("scene ready ({} indices)", buffers.index_count());

        Ok(Self {
            gpu,
            buffers,
            pipeline,
            _texture: texture,
            binding,
            frame: None,
        })
    }
}

impl FrameDevice for GpuFrameDevice<'_> {
    fn swap_chain_desc(&self) -> SwapChainDesc {
        self.gpu.swap_chain().desc()
    }

    /// Always `ZeroToOne`: wgpu normalizes clip-space depth to `[0, 1]` on
    /// every backend, GL included, so no per-backend check is needed. See
    /// "Depth convention on GL" in DESIGN.md; the `NegativeOneToOne` path is
    /// covered by the frame loop tests.
    fn depth_convention(&self) -> DepthConvention {
        DepthConvention::ZeroToOne
    }

    fn begin_frame(&mut self) -> Result<FrameStatus> {
        // A frame left over from an interrupted sequence is discarded.
        self.frame = None;

        let Some(back_buffer) = self.gpu.acquire()? else {
            return Ok(FrameStatus::Skipped);
        };

        let encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("texcube frame encoder"),
            });

        self.frame = Some(InFlightFrame {
            back_buffer,
            encoder,
        });
        Ok(FrameStatus::Ready)
    }

    fn write_constants(&mut self, world_view_proj: &Mat4) {
        let constants = Constants {
            world_view_proj: *world_view_proj,
        };
        self.gpu
            .queue()
            .write_buffer(&self.buffers.constants, 0, bytemuck::bytes_of(&constants));
    }

    fn draw(&mut self, pass: &DrawPass) {
        let Some(frame) = self.frame.as_mut() else {
            log::warn!("draw without an acquired frame");
            return;
        };
        let [r, g, b, a] = pass.clear_color;

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("texcube cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.back_buffer.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.gpu.swap_chain().depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(pass.clear_depth),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        self.pipeline.bind(&mut rpass, &self.binding);
        rpass.set_vertex_buffer(0, self.buffers.vertices.slice(..));
        rpass.set_index_buffer(self.buffers.indices.slice(..), INDEX_FORMAT);
        rpass.draw_indexed(0..pass.index_count, 0, 0..1);
    }

    fn present(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        self.gpu
            .queue()
            .submit(std::iter::once(frame.encoder.finish()));
        frame.back_buffer.present();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.frame = None;
        self.gpu.resize(width, height);
    }
}
