use std::time::Duration;

use anyhow::bail;

use crate::coords::{Ortho, Viewport};
use crate::paint::Ratio;
use crate::surface::{Blend, ClearMask, DrawCall, DrawSurface, Primitive, RecordingSurface};
use crate::time::ManualClock;

use super::{WindowHandle, WindowSystem};

/// Number of times each [`WindowSystem`] entry point was called.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WindowCalls {
    pub init: usize,
    pub create_window: usize,
    pub make_context_current: usize,
    pub swap_buffers: usize,
    pub poll_events: usize,
    pub terminate: usize,
}

/// Window system without a window.
///
/// Behaves like a platform whose user closes the window after a scripted
/// number of event polls. Draw calls are recorded; every `swap_buffers`
/// moves the calls issued since the previous swap into [`frames`](Self::frames).
///
/// Intended for tests and CI runs of sketches.
#[derive(Debug)]
pub struct HeadlessBackend {
    scale_factor: f32,
    fixed_framebuffer: Option<(u32, u32)>,
    close_after_polls: Option<usize>,
    fail_init: bool,
    fail_create: bool,
    clock_step: Option<(ManualClock, Duration)>,

    initialized: bool,
    window: Option<WindowHandle>,
    requested: (u32, u32),
    title: String,
    close_requested: bool,

    calls: WindowCalls,
    surface: RecordingSurface,
    frames: Vec<Vec<DrawCall>>,
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            scale_factor: 1.0,
            fixed_framebuffer: None,
            close_after_polls: None,
            fail_init: false,
            fail_create: false,
            clock_step: None,
            initialized: false,
            window: None,
            requested: (0, 0),
            title: String::new(),
            close_requested: false,
            calls: WindowCalls::default(),
            surface: RecordingSurface::new(),
            frames: Vec::new(),
        }
    }

    /// The window reports "should close" once `polls` event polls have happened.
    pub fn close_after(mut self, polls: usize) -> Self {
        self.close_after_polls = Some(polls);
        self
    }

    /// Physical pixels per logical pixel; the framebuffer is the requested size times this.
    pub fn scale_factor(mut self, scale: f32) -> Self {
        self.scale_factor = scale;
        self
    }

    /// Reports a fixed framebuffer size regardless of the requested window size.
    pub fn framebuffer(mut self, width: u32, height: u32) -> Self {
        self.fixed_framebuffer = Some((width, height));
        self
    }

    pub fn fail_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn fail_window_creation(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Advances `clock` by `step` on every event poll, simulating time spent per loop iteration.
    pub fn advance_clock_on_poll(mut self, clock: ManualClock, step: Duration) -> Self {
        self.clock_step = Some((clock, step));
        self
    }

    /// Changes the framebuffer size, as a user resizing the window would.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.fixed_framebuffer = Some((width, height));
    }

    /// Makes `window_should_close` report true from now on.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    #[inline]
    pub fn calls(&self) -> WindowCalls {
        self.calls
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Calls issued since the last swap.
    #[inline]
    pub fn pending(&self) -> &RecordingSurface {
        &self.surface
    }

    /// Calls of every presented frame, oldest first.
    #[inline]
    pub fn frames(&self) -> &[Vec<DrawCall>] {
        &self.frames
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.calls.terminate > 0 && !self.initialized
    }
}

impl WindowSystem for HeadlessBackend {
    fn init(&mut self) -> anyhow::Result<()> {
        self.calls.init += 1;
        if self.fail_init {
            bail!("headless init failure requested");
        }
        self.initialized = true;
        Ok(())
    }

    fn create_window(&mut self, width: u32, height: u32, title: &str) -> Option<WindowHandle> {
        self.calls.create_window += 1;
        if self.fail_create || !self.initialized {
            return None;
        }
        self.requested = (width, height);
        self.title = title.to_string();
        let handle = WindowHandle(1);
        self.window = Some(handle);
        Some(handle)
    }

    fn framebuffer_size(&self, window: WindowHandle) -> (u32, u32) {
        if self.window != Some(window) {
            return (0, 0);
        }
        self.fixed_framebuffer.unwrap_or_else(|| {
            let (w, h) = self.requested;
            (
                (w as f32 * self.scale_factor).round() as u32,
                (h as f32 * self.scale_factor).round() as u32,
            )
        })
    }

    fn make_context_current(&mut self, _window: WindowHandle) {
        self.calls.make_context_current += 1;
    }

    fn swap_buffers(&mut self, _window: WindowHandle) {
        self.calls.swap_buffers += 1;
        self.frames.push(self.surface.take());
    }

    fn window_should_close(&self, window: WindowHandle) -> bool {
        if self.window != Some(window) || self.close_requested {
            return true;
        }
        self.close_after_polls
            .is_some_and(|limit| self.calls.poll_events >= limit)
    }

    fn poll_events(&mut self) {
        self.calls.poll_events += 1;
        if let Some((clock, step)) = &self.clock_step {
            clock.advance(*step);
        }
    }

    fn terminate(&mut self) {
        self.calls.terminate += 1;
        self.initialized = false;
        self.window = None;
    }
}

impl DrawSurface for HeadlessBackend {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.surface.set_viewport(viewport);
    }

    fn load_identity(&mut self) {
        self.surface.load_identity();
    }

    fn set_projection(&mut self, projection: Ortho) {
        self.surface.set_projection(projection);
    }

    fn set_clear_color(&mut self, color: [Ratio; 4]) {
        self.surface.set_clear_color(color);
    }

    fn clear(&mut self, mask: ClearMask) {
        self.surface.clear(mask);
    }

    fn set_blend(&mut self, blend: Blend) {
        self.surface.set_blend(blend);
    }

    fn set_color(&mut self, color: [Ratio; 4]) {
        self.surface.set_color(color);
    }

    fn set_line_width(&mut self, width: f32) {
        self.surface.set_line_width(width);
    }

    fn begin(&mut self, primitive: Primitive) {
        self.surface.begin(primitive);
    }

    fn vertex(&mut self, x: f32, y: f32) {
        self.surface.vertex(x, y);
    }

    fn end(&mut self) {
        self.surface.end();
    }
}
