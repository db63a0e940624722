//! Coordinate and geometry types shared by shapes, canvas and renderers.
//!
//! Canvas space:
//! - one unit per framebuffer pixel
//! - origin bottom-left
//! - +X right, +Y up
//!
//! Renderers convert to NDC with the active [`Ortho`] projection.

mod ortho;
mod vec2;
mod viewport;

pub use ortho::Ortho;
pub use vec2::Vec2;
pub use viewport::Viewport;
