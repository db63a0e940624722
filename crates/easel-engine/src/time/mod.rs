//! Time subsystem.
//!
//! Provides the redraw throttle used by the sketch loop, behind an injectable
//! [`Clock`] so elapsed time can be simulated in tests and headless runs.

mod clock;
mod frame_clock;

pub use clock::{Clock, ManualClock, SystemClock};
pub use frame_clock::{FrameClock, FrameTime};
