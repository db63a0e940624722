use std::time::Duration;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::coords::{Ortho, Viewport};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::paint::Ratio;
use crate::render::ImmediateRenderer;
use crate::surface::{Blend, ClearMask, DrawSurface, Primitive};

use super::{WindowHandle, WindowSystem};

/// Upper bound on event pumps while waiting for the platform to let us
/// create a window.
const CREATE_PUMP_LIMIT: usize = 100;
const CREATE_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct WindowRequest {
    width: u32,
    height: u32,
    title: String,
}

/// Receives winit callbacks during pumps.
struct Handler {
    gpu_init: GpuInit,
    transparent: bool,
    request: Option<WindowRequest>,
    entry: Option<WindowEntry>,
    close_requested: bool,
}

impl Handler {
    /// Windows can only be created with an active event loop, so requests
    /// are parked here until the next callback.
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        let Some(request) = self.request.take() else { return };

        match self.create_entry(event_loop, request) {
            Ok(entry) => self.entry = Some(entry),
            Err(e) => log::error!("failed to create window: {e:#}"),
        }
    }

    fn create_entry(&self, event_loop: &ActiveEventLoop, request: WindowRequest) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(request.title)
            .with_inner_size(LogicalSize::new(request.width as f64, request.height as f64))
            .with_transparent(self.transparent);

        let window = event_loop
            .create_window(attrs)
            .context("winit refused to create the window")?;

        let gpu_init = self.gpu_init.clone();
        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")
    }

    fn owns(&self, id: WindowId) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|e| e.with_window(|w| w.id()) == id)
    }
}

impl ApplicationHandler for Handler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if !self.owns(window_id) {
            return;
        }
        let Some(entry) = self.entry.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }
            _ => {}
        }
    }
}

/// winit window drawn with wgpu.
///
/// Events are dispatched with `pump_app_events`, so the caller keeps control
/// of the loop. winit allows one event loop per process: once terminated, a
/// `WinitBackend` cannot be initialized again, and neither can a new one.
pub struct WinitBackend {
    event_loop: Option<EventLoop<()>>,
    handler: Handler,
    renderer: ImmediateRenderer,
    window: Option<WindowHandle>,
    next_id: u64,
}

impl Default for WinitBackend {
    fn default() -> Self {
        Self::new(GpuInit::default())
    }
}

impl WinitBackend {
    pub fn new(gpu_init: GpuInit) -> Self {
        Self {
            event_loop: None,
            handler: Handler {
                gpu_init,
                transparent: false,
                request: None,
                entry: None,
                close_requested: false,
            },
            renderer: ImmediateRenderer::new(),
            window: None,
            next_id: 0,
        }
    }

    /// Asks for a window the compositor blends with the desktop, for
    /// canvases with a transparent background.
    pub fn transparent(mut self) -> Self {
        self.handler.transparent = true;
        self.handler.gpu_init = self.handler.gpu_init.transparent();
        self
    }

    fn pump(&mut self, timeout: Duration) {
        let Some(event_loop) = self.event_loop.as_mut() else { return };

        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(timeout), &mut self.handler) {
            log::info!("event loop exited with code {code}");
            self.handler.close_requested = true;
        }
    }
}

impl WindowSystem for WinitBackend {
    fn init(&mut self) -> Result<()> {
        if self.event_loop.is_some() {
            return Ok(());
        }

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop = Some(event_loop);

        log::debug!("winit event loop created");
        Ok(())
    }

    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<WindowHandle> {
        if self.event_loop.is_none() {
            log::error!("create_window called before init");
            return None;
        }

        self.handler.entry = None;
        self.handler.close_requested = false;
        self.handler.request = Some(WindowRequest {
            width,
            height,
            title: title.to_string(),
        });

        for _ in 0..CREATE_PUMP_LIMIT {
            self.pump(CREATE_PUMP_TIMEOUT);
            if self.handler.request.is_none() || self.handler.close_requested {
                break;
            }
        }

        if self.handler.request.take().is_some() {
            log::error!("platform never became ready to create a window");
        }
        self.handler.entry.as_ref()?;

        self.next_id += 1;
        let handle = WindowHandle(self.next_id);
        self.window = Some(handle);
        Some(handle)
    }

    fn framebuffer_size(&self, window: WindowHandle) -> (u32, u32) {
        match &self.handler.entry {
            Some(entry) if self.window == Some(window) => {
                let size = entry.with_window(|w| w.inner_size());
                (size.width, size.height)
            }
            _ => (0, 0),
        }
    }

    // wgpu has no current-context notion; each window owns its device.
    fn make_context_current(&mut self, _window: WindowHandle) {}

    fn swap_buffers(&mut self, window: WindowHandle) {
        if self.window != Some(window) {
            return;
        }
        let Some(entry) = self.handler.entry.as_mut() else { return };

        entry.with_window(|w| w.pre_present_notify());

        let renderer = &mut self.renderer;
        if let Err(SurfaceErrorAction::Fatal) = entry.with_gpu_mut(|gpu| renderer.flush(gpu)) {
            log::error!("GPU out of memory; closing the window");
            self.handler.close_requested = true;
        }
    }

    fn window_should_close(&self, window: WindowHandle) -> bool {
        self.window != Some(window) || self.handler.entry.is_none() || self.handler.close_requested
    }

    fn poll_events(&mut self) {
        self.pump(Duration::ZERO);
    }

    fn terminate(&mut self) {
        self.window = None;
        self.handler.entry = None;
        self.handler.request = None;
        self.event_loop = None;
        log::debug!("window system terminated");
    }
}

impl DrawSurface for WinitBackend {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.renderer.set_viewport(viewport);
    }

    fn load_identity(&mut self) {
        self.renderer.load_identity();
    }

    fn set_projection(&mut self, projection: Ortho) {
        self.renderer.set_projection(projection);
    }

    fn set_clear_color(&mut self, color: [Ratio; 4]) {
        self.renderer.set_clear_color(color);
    }

    fn clear(&mut self, mask: ClearMask) {
        self.renderer.clear(mask);
    }

    fn set_blend(&mut self, blend: Blend) {
        self.renderer.set_blend(blend);
    }

    fn set_color(&mut self, color: [Ratio; 4]) {
        self.renderer.set_color(color);
    }

    fn set_line_width(&mut self, width: f32) {
        self.renderer.set_line_width(width);
    }

    fn begin(&mut self, primitive: Primitive) {
        self.renderer.begin(primitive);
    }

    fn vertex(&mut self, x: f32, y: f32) {
        self.renderer.vertex(x, y);
    }

    fn end(&mut self) {
        self.renderer.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These never touch the display server.

    #[test]
    fn window_needs_init() {
        let mut backend = WinitBackend::default();
        assert!(backend.create_window(10, 10, "t").is_none());
        assert!(backend.window_should_close(WindowHandle(1)));
        assert_eq!(backend.framebuffer_size(WindowHandle(1)), (0, 0));
    }

    #[test]
    fn transparent_requests_compositor_alpha() {
        let backend = WinitBackend::default().transparent();
        assert!(backend.handler.transparent);
        assert_eq!(
            backend.handler.gpu_init.alpha_mode,
            Some(wgpu::CompositeAlphaMode::PreMultiplied)
        );
    }
}
