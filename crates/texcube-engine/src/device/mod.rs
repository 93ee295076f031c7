//! GPU device + swap chain management.
//!
//! [`Backend`] picks the graphics API and creates a [`Gpu`]: wgpu
//! Instance/Adapter/Device/Queue plus a [`SwapChain`] with its depth buffer.

mod backend;
mod gpu;
mod init;
mod swap_chain;

pub use backend::Backend;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use swap_chain::{BackBuffer, SurfaceErrorAction, SwapChain, SwapChainDesc};
