//! The window being drawn on.

use crate::coords::{Ortho, Viewport};
use crate::error::{Result, SketchError};
use crate::paint::{Color, Ratio};
use crate::surface::{Blend, ClearMask, DrawSurface};
use crate::window::{Backend, WindowHandle};

/// Title used when none is configured.
pub const DEFAULT_TITLE: &str = "Sketch";

/// What every frame starts from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Background {
    Color(Color),
    /// Clears to `(0, 0, 0, 0)`.
    Transparent,
}

impl Background {
    pub fn clear_color(self) -> [Ratio; 4] {
        match self {
            Background::Color(c) => c.ratios(),
            Background::Transparent => Color::TRANSPARENT.ratios(),
        }
    }
}

impl Default for Background {
    /// Opaque black.
    fn default() -> Self {
        Background::Color(Color::from_unit(0))
    }
}

impl From<Color> for Background {
    fn from(c: Color) -> Self {
        Background::Color(c)
    }
}

impl From<u8> for Background {
    fn from(v: u8) -> Self {
        Background::Color(Color::from_unit(v))
    }
}

/// Canvas creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Requested size in logical pixels.
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub background: Background,
    /// Blending applied once after the window is created.
    pub blend: Blend,
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: DEFAULT_TITLE.to_string(),
            background: Background::default(),
            blend: Blend::Alpha,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn background(mut self, background: impl Into<Background>) -> Self {
        self.background = background.into();
        self
    }

    pub fn transparent(mut self) -> Self {
        self.background = Background::Transparent;
        self
    }

    pub fn blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }
}

/// A window plus the backend that draws into it.
///
/// `width`/`height` are framebuffer pixels as reported by the window system
/// after creation and refreshed on every [`clear`](Self::clear); on high-DPI
/// displays they exceed the requested size.
pub struct Canvas<B: Backend> {
    backend: B,
    window: WindowHandle,
    width: u32,
    height: u32,
    background: Background,
}

impl<B: Backend> Canvas<B> {
    /// Starts `backend`, opens the window and configures blending.
    pub fn new(mut backend: B, config: CanvasConfig) -> Result<Self> {
        if let Err(err) = backend.init() {
            log::error!("window system init failed: {err:#}");
            return Err(SketchError::Init { reason: format!("{err:#}") });
        }

        let Some(window) = backend.create_window(config.width, config.height, &config.title)
        else {
            log::error!("window creation failed ({}x{})", config.width, config.height);
            backend.terminate();
            return Err(SketchError::WindowCreation {
                width: config.width,
                height: config.height,
            });
        };

        let (width, height) = backend.framebuffer_size(window);
        backend.make_context_current(window);
        backend.set_blend(config.blend);

        log::info!(
            "canvas '{}' created: requested {}x{}, framebuffer {}x{}",
            config.title,
            config.width,
            config.height,
            width,
            height
        );

        Ok(Self {
            backend,
            window,
            width,
            height,
            background: config.background,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn background(&self) -> Background {
        self.background
    }

    pub fn set_background(&mut self, background: impl Into<Background>) {
        self.background = background.into();
    }

    #[inline]
    pub fn window(&self) -> WindowHandle {
        self.window
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The backend seen only as something to draw on.
    pub fn surface(&mut self) -> &mut dyn DrawSurface {
        &mut self.backend
    }

    /// Erases the frame and sets up the 2D projection.
    ///
    /// Refreshes the size from the framebuffer first so resizes are picked up.
    pub fn clear(&mut self) {
        let (width, height) = self.backend.framebuffer_size(self.window);
        if (width, height) != (self.width, self.height) {
            log::debug!("framebuffer resized to {width}x{height}");
        }
        self.width = width;
        self.height = height;

        self.backend.set_clear_color(self.background.clear_color());
        self.backend.clear(ClearMask::COLOR_DEPTH);
        self.backend.load_identity();
        self.backend.set_viewport(Viewport::full(width, height));
        self.backend
            .set_projection(Ortho::canvas(width as f32, height as f32));
    }

    /// Makes the frame drawn since the last [`clear`](Self::clear) visible.
    pub fn present(&mut self) {
        self.backend.swap_buffers(self.window);
    }

    pub fn should_close(&self) -> bool {
        self.backend.window_should_close(self.window)
    }

    pub fn poll_events(&mut self) {
        self.backend.poll_events();
    }

    /// Shuts the window system down. The canvas is unusable afterwards.
    pub fn terminate(&mut self) {
        self.backend.terminate();
    }
}
