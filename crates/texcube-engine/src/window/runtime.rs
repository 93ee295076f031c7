use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::assets::AssetPaths;
use crate::device::{Backend, GpuInit};
use crate::frame::{CameraConfig, FrameLoop, FrameStatus, GpuFrameDevice};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub min_size: LogicalSize<f64>,
}

impl RuntimeConfig {
    /// `Tutorial03: Texturing (<API>)` at the tutorial's default size.
    pub fn for_backend(backend: Backend) -> Self {
        Self {
            title: format!("Tutorial03: Texturing ({})", backend.api_name()),
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Tutorial03: Texturing".to_string(),
            initial_size: LogicalSize::new(1024.0, 720.0),
            min_size: LogicalSize::new(200.0, 200.0),
        }
    }
}

/// Everything needed to build the scene once the window exists.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub backend: Backend,
    pub gpu_init: GpuInit,
    pub assets: AssetPaths,
    pub camera: CameraConfig,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and renders until it is closed.
    ///
    /// Startup failures (device, shaders, texture) and fatal surface errors
    /// end the event loop and are returned here.
    pub fn run(config: RuntimeConfig, scene: SceneConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    frame_loop: FrameLoop<GpuFrameDevice<'this>>,
}

struct AppState {
    config: RuntimeConfig,
    scene: SceneConfig,

    window: Option<WindowEntry>,
    error: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, scene: SceneConfig) -> Self {
        Self {
            config,
            scene,
            window: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error.get_or_insert(err);
        self.window = None;
        event_loop.exit();
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_min_inner_size(self.config.min_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let scene = self.scene.clone();
        log::info!("starting with backend {} ({})", scene.backend, scene.backend.api_name());

        WindowEntry::try_new(FrameClock::new(), window, |w| {
            let gpu = scene
                .backend
                .create_device_context_and_swap_chain(w, scene.gpu_init)
                .context("failed to initialize the graphics device")?;
            let device = GpuFrameDevice::new(gpu, &scene.assets)
                .context("failed to create scene resources")?;
            Ok(FrameLoop::new(device, scene.camera))
        })
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(mut entry) => {
                // Animation time starts with the first frame, not with device creation.
                entry.with_clock_mut(|c| c.reset());
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                let frames = entry.with_frame_loop(|fl| fl.frames_presented());
                log::info!("window closed after {frames} frames");
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                entry.with_frame_loop_mut(|fl| fl.resize(size.width, size.height));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.with_frame_loop_mut(|fl| fl.resize(size.width, size.height));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                let result = entry.with_mut(|fields| {
                    let ft = fields.clock.tick();
                    fields.frame_loop.render_frame(ft.elapsed)
                });

                match result {
                    Ok(status) => {
                        if status == FrameStatus::Skipped {
                            log::trace!("frame skipped");
                        }
                        // Continuous animation.
                        entry.with_window(|w| w.request_redraw());
                    }
                    Err(err) => self.fail(event_loop, anyhow::Error::new(err).context("render failed")),
                }
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_names_the_api() {
        assert_eq!(
            RuntimeConfig::for_backend(Backend::VK).title,
            "Tutorial03: Texturing (Vulkan)"
        );
        assert_eq!(
            RuntimeConfig::for_backend(Backend::D3D11).title,
            "Tutorial03: Texturing (Direct3D11)"
        );
    }

    #[test]
    fn default_window_size() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, LogicalSize::new(1024.0, 720.0));
        assert_eq!(cfg.min_size, LogicalSize::new(200.0, 200.0));
    }
}
