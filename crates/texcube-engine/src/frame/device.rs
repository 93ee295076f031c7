use crate::device::SwapChainDesc;
use crate::error::Result;
use crate::math::{DepthConvention, Mat4};

/// Outcome of a frame attempt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    Ready,
    /// Nothing was drawn (empty swap chain or recoverable surface error).
    Skipped,
}

/// Clear values and index count for the single cube draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawPass {
    pub clear_color: [f64; 4],
    pub clear_depth: f32,
    pub index_count: u32,
}

/// What the frame loop needs from the GPU.
///
/// Call order per frame: `begin_frame`, then (only if it returned
/// [`FrameStatus::Ready`]) `write_constants`, `draw`, `present`.
pub trait FrameDevice {
    fn swap_chain_desc(&self) -> SwapChainDesc;

    /// Depth range of clip space on this device.
    fn depth_convention(&self) -> DepthConvention;

    /// Acquires the back buffer and depth target for a new frame.
    fn begin_frame(&mut self) -> Result<FrameStatus>;

    /// Replaces the contents of the constants buffer.
    fn write_constants(&mut self, world_view_proj: &Mat4);

    fn draw(&mut self, pass: &DrawPass);

    fn present(&mut self);

    fn resize(&mut self, width: u32, height: u32);
}
