//! Window-system capability and its backends.
//!
//! [`WindowSystem`] is the narrow contract the canvas and the loop need from
//! a platform: start, open one window, report its framebuffer size, present,
//! poll events and shut down. A [`Backend`] is a window system that is also
//! a [`DrawSurface`](crate::surface::DrawSurface).
//!
//! - [`runtime::WinitBackend`]: winit window + wgpu renderer
//! - [`headless::HeadlessBackend`]: scripted, records draw calls

pub mod headless;
pub mod runtime;

use crate::surface::DrawSurface;

pub use headless::{HeadlessBackend, WindowCalls};
pub use runtime::WinitBackend;

/// Opaque identifier of a window created by a [`WindowSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct WindowHandle(pub(crate) u64);

impl WindowHandle {
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Platform windowing contract.
pub trait WindowSystem {
    /// Starts the platform layer. Must succeed before any window is created.
    fn init(&mut self) -> anyhow::Result<()>;

    /// Opens a window; `None` if the platform could not create it.
    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<WindowHandle>;

    /// Drawable size in physical pixels.
    fn framebuffer_size(&self, window: WindowHandle) -> (u32, u32);

    fn make_context_current(&mut self, window: WindowHandle);

    /// Presents everything drawn since the last swap.
    fn swap_buffers(&mut self, window: WindowHandle);

    fn window_should_close(&self, window: WindowHandle) -> bool;

    /// Dispatches pending events without blocking.
    fn poll_events(&mut self);

    /// Releases the window and the platform layer.
    fn terminate(&mut self);
}

/// A window system that can also be drawn on.
pub trait Backend: WindowSystem + DrawSurface {}

impl<T: WindowSystem + DrawSurface> Backend for T {}
