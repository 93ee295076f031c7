use core::f32::consts::PI;
use std::time::Duration;

use crate::cube::CUBE_INDICES;
use crate::error::Result;
use crate::math::{perspective_fov, DepthConvention, Mat4, Vec3};

use super::{DrawPass, FrameDevice, FrameStatus};

/// Camera and clear settings for the spinning cube.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view, radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the eye to the cube center along +Z.
    pub eye_distance: f32,
    /// Constant rotation about X applied before the spin, radians.
    pub tilt: f32,
    /// Spin about Y, radians per second.
    pub spin_rate: f32,
    pub clear_color: [f64; 4],
    pub clear_depth: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: PI / 4.0,
            near: 0.01,
            far: 100.0,
            eye_distance: 5.0,
            tilt: -PI * 0.1,
            spin_rate: 1.0,
            clear_color: [0.35, 0.35, 0.35, 1.0],
            clear_depth: 1.0,
        }
    }
}

impl CameraConfig {
    /// `world * view * proj` for the given elapsed time and viewport.
    pub fn world_view_proj(
        &self,
        elapsed: Duration,
        width: u32,
        height: u32,
        convention: DepthConvention,
    ) -> Result<Mat4> {
        let seconds = (elapsed.as_millis() as f64 / 1000.0) as f32;
        let world = Mat4::rotation_y(seconds * self.spin_rate) * Mat4::rotation_x(self.tilt);
        let view = Mat4::translation(Vec3::new(0.0, 0.0, self.eye_distance));
        let proj = perspective_fov(
            self.fov,
            width as f32 / height as f32,
            self.near,
            self.far,
            convention,
        )?;
        Ok(world * view * proj)
    }
}

/// Per-frame update + draw sequence, independent of the windowing layer.
pub struct FrameLoop<D> {
    device: D,
    camera: CameraConfig,
    frames: u64,
}

impl<D: FrameDevice> FrameLoop<D> {
    pub fn new(device: D, camera: CameraConfig) -> Self {
        Self {
            device,
            camera,
            frames: 0,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Frames actually presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    /// Renders one frame for `elapsed` time since start.
    ///
    /// Rendering is a pure function of `elapsed` and the swap chain size, so
    /// calling this twice with the same input writes the same constants.
    pub fn render_frame(&mut self, elapsed: Duration) -> Result<FrameStatus> {
        let desc = self.device.swap_chain_desc();
        if desc.is_empty() {
            log::trace!("swap chain is {}x{}, skipping frame", desc.width, desc.height);
            return Ok(FrameStatus::Skipped);
        }

        if self.device.begin_frame()? == FrameStatus::Skipped {
            return Ok(FrameStatus::Skipped);
        }

        let convention = self.device.depth_convention();
        let wvp = self
            .camera
            .world_view_proj(elapsed, desc.width, desc.height, convention)?;

        self.device.write_constants(&wvp.transpose());
        self.device.draw(&DrawPass {
            clear_color: self.camera.clear_color,
            clear_depth: self.camera.clear_depth,
            index_count: CUBE_INDICES.len() as u32,
        });
        self.device.present();

        self.frames += 1;
        Ok(FrameStatus::Ready)
    }

    /// Forwards the new window size to the swap chain unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("resize {width}x{height}");
        self.device.resize(width, height);
    }
}
