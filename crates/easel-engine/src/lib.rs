//! Easel engine crate.
//!
//! A small immediate-mode 2D sketching library: open a canvas, describe
//! shapes as values and draw them from a redraw loop.
//!
//! ```no_run
//! use easel_engine::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut sketch = Sketch::new();
//!     sketch.create_canvas(WinitBackend::default(), CanvasConfig::new(640, 480))?;
//!     sketch.run_loop(|frame| {
//!         frame.draw(Circle::new(320.0, 240.0, 100.0).fill(Color::WHITE));
//!     })?;
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod coords;
pub mod device;
pub mod error;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shapes;
pub mod sketch;
pub mod surface;
pub mod time;
pub mod window;

pub use error::{Result, SketchError};

/// Everything a sketch usually needs.
pub mod prelude {
    pub use crate::canvas::{Background, Canvas, CanvasConfig};
    pub use crate::coords::Vec2;
    pub use crate::device::GpuInit;
    pub use crate::error::SketchError;
    pub use crate::logging::{init_logging, LoggingConfig};
    pub use crate::paint::{ByteInt, Color};
    pub use crate::shapes::{Circle, Ellipse, Line, Rect, Shape, Style, Styled};
    pub use crate::sketch::{Frame, Sketch};
    pub use crate::surface::{Blend, DrawSurface};
    pub use crate::window::{HeadlessBackend, WinitBackend};
}
