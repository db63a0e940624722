//! The redraw loop.
//!
//! A [`Sketch`] owns at most one [`Canvas`] and drives it until the window is
//! closed: every iteration checks the close flag, redraws when looping is
//! enabled and the redraw interval has elapsed, then polls window events.
//! Event polling is never throttled, so the window stays responsive whatever
//! the redraw rate.

use std::time::Duration;

use crate::canvas::{Canvas, CanvasConfig};
use crate::error::{Result, SketchError};
use crate::shapes::Shape;
use crate::surface::DrawSurface;
use crate::time::{Clock, FrameClock, FrameTime, SystemClock};
use crate::window::Backend;

/// Loop switches shared between the sketch and the frame being drawn.
#[derive(Debug, Copy, Clone)]
struct LoopControl {
    running: bool,
    delay: Duration,
}

impl Default for LoopControl {
    fn default() -> Self {
        Self {
            running: false,
            delay: Duration::ZERO,
        }
    }
}

/// Per-frame context passed to the draw callback.
pub struct Frame<'a> {
    surface: &'a mut dyn DrawSurface,
    width: u32,
    height: u32,
    time: FrameTime,
    control: &'a mut LoopControl,
}

impl<'a> Frame<'a> {
    /// Draws `shape` immediately.
    pub fn draw(&mut self, shape: impl Into<Shape>) {
        shape.into().draw(&mut *self.surface);
    }

    /// Raw access for callers issuing their own primitives.
    pub fn surface(&mut self) -> &mut (dyn DrawSurface + 'a) {
        &mut *self.surface
    }

    /// Canvas width in framebuffer pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// Stops redrawing after this frame. Events are still polled.
    pub fn no_loop(&mut self) {
        self.control.running = false;
    }

    /// Sets the minimum interval before the next redraw.
    pub fn wait(&mut self, delay: Duration) {
        self.control.delay = delay;
    }
}

/// Loop controller owning the canvas.
pub struct Sketch<B: Backend, C: Clock = SystemClock> {
    canvas: Option<Canvas<B>>,
    control: LoopControl,
    clock: FrameClock<C>,
}

impl<B: Backend> Sketch<B, SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_canvas(canvas: Canvas<B>) -> Self {
        let mut sketch = Self::new();
        sketch.attach(canvas);
        sketch
    }
}

impl<B: Backend> Default for Sketch<B, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend, C: Clock> Sketch<B, C> {
    /// Sketch timed by `clock` instead of the wall clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            canvas: None,
            control: LoopControl::default(),
            clock: FrameClock::with_clock(clock),
        }
    }

    /// Creates a canvas on `backend` and attaches it, replacing any previous one.
    pub fn create_canvas(&mut self, backend: B, config: CanvasConfig) -> Result<&mut Canvas<B>> {
        let canvas = Canvas::new(backend, config)?;
        Ok(self.canvas.insert(canvas))
    }

    /// Attaches `canvas`, returning the one it replaces.
    pub fn attach(&mut self, canvas: Canvas<B>) -> Option<Canvas<B>> {
        self.canvas.replace(canvas)
    }

    pub fn canvas(&self) -> Option<&Canvas<B>> {
        self.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self) -> Option<&mut Canvas<B>> {
        self.canvas.as_mut()
    }

    /// Stops redrawing; safe to call repeatedly.
    ///
    /// [`run_loop`](Self::run_loop) re-enables looping when it starts, so this
    /// is meant to be called from the draw callback (see [`Frame::no_loop`]).
    pub fn no_loop(&mut self) {
        self.control.running = false;
    }

    /// Sets the minimum interval between redraws. Does not block.
    pub fn wait(&mut self, delay: Duration) {
        self.control.delay = delay;
    }

    /// [`wait`](Self::wait) in seconds. Negative or NaN values mean no delay.
    pub fn wait_secs(&mut self, secs: f64) {
        self.wait(secs_to_duration(secs));
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.control.running
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.control.delay
    }

    /// Runs until the window is closed, then terminates the window system.
    ///
    /// Each redraw clears the canvas, calls `draw` once to completion and
    /// presents the result.
    pub fn run_loop<F>(&mut self, mut draw: F) -> Result<()>
    where
        F: FnMut(&mut Frame<'_>),
    {
        let Some(canvas) = self.canvas.as_mut() else {
            log::error!("run_loop called without a canvas");
            return Err(SketchError::NoCanvas);
        };

        self.control.running = true;
        self.clock.reset();
        log::info!("sketch loop started (delay {:?})", self.control.delay);

        let mut drawn = 0u64;

        while !canvas.should_close() {
            self.clock.set_delay(self.control.delay);

            if self.control.running && self.clock.is_elapsed() {
                canvas.clear();
                let time = self.clock.tick();

                {
                    let (width, height) = (canvas.width(), canvas.height());
                    let mut frame = Frame {
                        surface: canvas.backend_mut(),
                        width,
                        height,
                        time,
                        control: &mut self.control,
                    };
                    draw(&mut frame);
                }

                canvas.present();
                self.clock.reset();
                drawn += 1;

                if !self.control.running {
                    log::debug!("looping stopped after frame {}", time.frame_index);
                }
            }

            canvas.poll_events();
        }

        canvas.terminate();
        log::info!("sketch loop finished after {drawn} frames");

        Ok(())
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        Duration::ZERO
    } else {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::shapes::{Circle, Rect, Styled};
    use crate::surface::{DrawCall, Primitive};
    use crate::time::ManualClock;
    use crate::window::{HeadlessBackend, WindowCalls};

    fn sketch_closing_after(polls: usize) -> Sketch<HeadlessBackend> {
        let mut sketch = Sketch::new();
        sketch
            .create_canvas(HeadlessBackend::new().close_after(polls), CanvasConfig::new(100, 100))
            .unwrap();
        sketch
    }

    fn simulated(polls: usize, step: Duration) -> Sketch<HeadlessBackend, ManualClock> {
        let clock = ManualClock::new();
        let backend = HeadlessBackend::new()
            .close_after(polls)
            .advance_clock_on_poll(clock.clone(), step);
        let mut sketch = Sketch::with_clock(clock);
        sketch.create_canvas(backend, CanvasConfig::new(100, 100)).unwrap();
        sketch
    }

    fn calls<C: Clock>(sketch: &Sketch<HeadlessBackend, C>) -> WindowCalls {
        sketch.canvas().unwrap().backend().calls()
    }

    #[test]
    fn run_loop_without_canvas_fails() {
        let mut sketch: Sketch<HeadlessBackend> = Sketch::new();
        let mut called = false;
        let err = sketch.run_loop(|_| called = true).unwrap_err();
        assert!(matches!(err, SketchError::NoCanvas));
        assert!(!called);
    }

    #[test]
    fn draws_every_iteration_without_delay() {
        let mut sketch = sketch_closing_after(5);
        let mut frames = 0;
        sketch.run_loop(|_| frames += 1).unwrap();

        assert_eq!(frames, 5);
        let c = calls(&sketch);
        assert_eq!(c.swap_buffers, 5);
        assert_eq!(c.poll_events, 5);
        assert_eq!(c.terminate, 1);
    }

    #[test]
    fn no_loop_stops_drawing_but_not_polling() {
        let mut sketch = sketch_closing_after(10);
        let mut frames = 0;
        sketch
            .run_loop(|frame| {
                frames += 1;
                if frames == 3 {
                    frame.no_loop();
                }
            })
            .unwrap();

        assert_eq!(frames, 3);
        let c = calls(&sketch);
        assert_eq!(c.swap_buffers, 3);
        assert_eq!(c.poll_events, 10);
        assert_eq!(c.terminate, 1);
        assert!(!sketch.is_looping());
    }

    #[test]
    fn no_loop_is_idempotent() {
        let mut sketch = sketch_closing_after(4);
        let mut frames = 0;
        sketch
            .run_loop(|frame| {
                frames += 1;
                frame.no_loop();
                frame.no_loop();
            })
            .unwrap();

        assert_eq!(frames, 1);
        assert_eq!(calls(&sketch).poll_events, 4);
        // Only the first frame was cleared and presented.
        assert_eq!(sketch.canvas().unwrap().backend().frames().len(), 1);
    }

    #[test]
    fn run_loop_reenables_looping() {
        let mut sketch = sketch_closing_after(2);
        sketch.no_loop();
        sketch.no_loop();
        let mut frames = 0;
        sketch.run_loop(|_| frames += 1).unwrap();
        assert_eq!(frames, 2);
    }

    #[test]
    fn delay_throttles_redraws() {
        // 250ms per iteration, 1s between redraws: redraws at t = 1s and t = 2s.
        let mut sketch = simulated(10, Duration::from_millis(250));
        sketch.wait(Duration::from_secs(1));

        let mut frames = 0;
        sketch.run_loop(|_| frames += 1).unwrap();

        assert_eq!(frames, 2);
        assert_eq!(calls(&sketch).poll_events, 10);
    }

    #[test]
    fn wait_from_frame_applies_to_next_check() {
        let mut sketch = simulated(10, Duration::from_millis(250));

        let mut times = Vec::new();
        sketch
            .run_loop(|frame| {
                times.push(frame.time());
                frame.wait(Duration::from_secs(1));
            })
            .unwrap();

        // Immediate first frame, then t = 1s and t = 2s.
        assert_eq!(times.len(), 3);
        assert_eq!(times.iter().map(|t| t.frame_index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!((times[1].dt - 1.0).abs() < 1e-6);
        assert_eq!(sketch.delay(), Duration::from_secs(1));
    }

    #[test]
    fn frame_exposes_canvas_size() {
        let mut sketch = Sketch::new();
        sketch
            .create_canvas(
                HeadlessBackend::new().close_after(1).scale_factor(2.0),
                CanvasConfig::new(50, 40),
            )
            .unwrap();

        let mut size = (0, 0);
        sketch.run_loop(|frame| size = (frame.width(), frame.height())).unwrap();
        assert_eq!(size, (100, 80));
    }

    #[test]
    fn frames_are_cleared_then_drawn_then_presented() {
        let mut sketch = sketch_closing_after(2);
        sketch
            .run_loop(|frame| {
                frame.draw(Rect::new(0.0, 0.0, 10.0, 10.0).fill(Color::WHITE));
                frame.draw(Circle::new(50.0, 50.0, 5.0).fill(200));
            })
            .unwrap();

        let frames = sketch.canvas().unwrap().backend().frames();
        assert_eq!(frames.len(), 2);

        let second = &frames[1];
        assert!(matches!(second[0], DrawCall::ClearColor(_)));
        let polygons = second
            .iter()
            .filter(|c| **c == DrawCall::Begin(Primitive::Polygon))
            .count();
        assert_eq!(polygons, 2);
        assert_eq!(second.last(), Some(&DrawCall::End));
    }

    #[test]
    fn failed_canvas_creation_leaves_sketch_empty() {
        let mut sketch: Sketch<HeadlessBackend> = Sketch::new();
        let err = sketch
            .create_canvas(HeadlessBackend::new().fail_init(), CanvasConfig::new(1, 1))
            .err()
            .unwrap();
        assert!(matches!(err, SketchError::Init { .. }));
        assert!(sketch.canvas().is_none());
    }

    #[test]
    fn attach_replaces_previous_canvas() {
        let first = Canvas::new(HeadlessBackend::new(), CanvasConfig::new(1, 1)).unwrap();
        let second = Canvas::new(HeadlessBackend::new(), CanvasConfig::new(2, 2)).unwrap();

        let mut sketch = Sketch::with_canvas(first);
        let previous = sketch.attach(second).unwrap();
        assert_eq!(previous.width(), 1);
        assert_eq!(sketch.canvas().unwrap().width(), 2);
    }

    #[test]
    fn wait_secs_sanitizes_input() {
        let mut sketch: Sketch<HeadlessBackend> = Sketch::new();
        sketch.wait_secs(0.5);
        assert_eq!(sketch.delay(), Duration::from_millis(500));
        sketch.wait_secs(-1.0);
        assert_eq!(sketch.delay(), Duration::ZERO);
        sketch.wait_secs(f64::NAN);
        assert_eq!(sketch.delay(), Duration::ZERO);
    }
}
