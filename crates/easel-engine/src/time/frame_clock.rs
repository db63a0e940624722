use std::time::{Duration, Instant};

use super::{Clock, SystemClock};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous redraw, in seconds. Zero for the first frame.
    pub dt: f32,

    /// Monotonic timestamp taken when the frame started.
    pub now: Instant,

    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,
}

/// Redraw throttle and frame counter for one loop.
///
/// A redraw is due once at least `delay` has passed since the last
/// [`reset`](Self::reset). A zero delay makes every check succeed.
#[derive(Debug, Clone)]
pub struct FrameClock<C = SystemClock> {
    clock: C,
    reference: Instant,
    last_frame: Option<Instant>,
    frame_index: u64,
    delay: Duration,
}

impl FrameClock<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for FrameClock<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FrameClock<C> {
    pub fn with_clock(clock: C) -> Self {
        let reference = clock.now();
        Self {
            clock,
            reference,
            last_frame: None,
            frame_index: 0,
            delay: Duration::ZERO,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Minimum interval between redraws. Applies from the next [`is_elapsed`](Self::is_elapsed).
    #[inline]
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Restarts the interval from the current time.
    pub fn reset(&mut self) {
        self.reference = self.clock.now();
    }

    /// `now - last_reset >= delay`.
    pub fn is_elapsed(&self) -> bool {
        self.clock.now().saturating_duration_since(self.reference) >= self.delay
    }

    /// Records the start of a frame and returns its timing.
    pub fn tick(&mut self) -> FrameTime {
        let now = self.clock.now();
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);

        self.last_frame = Some(now);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    #[test]
    fn zero_delay_is_always_elapsed() {
        let clock = ManualClock::new();
        let fc = FrameClock::with_clock(clock);
        assert!(fc.is_elapsed());
    }

    #[test]
    fn not_elapsed_before_delay() {
        let clock = ManualClock::new();
        let mut fc = FrameClock::with_clock(clock.clone());
        fc.set_delay(Duration::from_secs(1));
        fc.reset();

        assert!(!fc.is_elapsed());
        clock.advance(Duration::from_millis(999));
        assert!(!fc.is_elapsed());
    }

    #[test]
    fn elapsed_at_and_after_delay() {
        let clock = ManualClock::new();
        let mut fc = FrameClock::with_clock(clock.clone());
        fc.set_delay(Duration::from_millis(500));
        fc.reset();

        clock.advance(Duration::from_millis(500));
        assert!(fc.is_elapsed());
        clock.advance(Duration::from_secs(3));
        assert!(fc.is_elapsed());
    }

    #[test]
    fn reset_restarts_interval() {
        let clock = ManualClock::new();
        let mut fc = FrameClock::with_clock(clock.clone());
        fc.set_delay(Duration::from_secs(1));

        clock.advance(Duration::from_secs(2));
        assert!(fc.is_elapsed());
        fc.reset();
        assert!(!fc.is_elapsed());
    }

    #[test]
    fn tick_counts_frames_and_measures_dt() {
        let clock = ManualClock::new();
        let mut fc = FrameClock::with_clock(clock.clone());

        let first = fc.tick();
        assert_eq!(first.frame_index, 0);
        assert_eq!(first.dt, 0.0);

        clock.advance(Duration::from_millis(250));
        let second = fc.tick();
        assert_eq!(second.frame_index, 1);
        assert!((second.dt - 0.25).abs() < 1e-6);
    }
}
