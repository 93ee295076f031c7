//! Per-frame render sequence.
//!
//! [`FrameLoop`] computes the transform and issues the draw through a
//! [`FrameDevice`]; [`GpuFrameDevice`] is the wgpu-backed device.

mod device;
mod frame_loop;
mod gpu;

pub use device::{DrawPass, FrameDevice, FrameStatus};
pub use frame_loop::{CameraConfig, FrameLoop};
pub use gpu::GpuFrameDevice;
