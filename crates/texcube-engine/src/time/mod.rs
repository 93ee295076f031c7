//! Time subsystem.
//!
//! One `FrameClock` per window; call `tick()` once per redraw to obtain the
//! elapsed time that drives the animation.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
