//! Texcube engine crate.
//!
//! Everything needed to put a textured, spinning cube on screen through wgpu:
//! backend selection, swap chain, pipeline, texture loading and the frame loop.

pub mod assets;
pub mod cube;
pub mod device;
pub mod frame;
pub mod logging;
pub mod math;
pub mod pipeline;
pub mod texture;
pub mod time;
pub mod window;

mod error;

pub use error::{Error, Result};
