//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and drives the frame loop from
//! redraw and resize events.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, SceneConfig};
