//! Paint model shared between shapes, canvas and renderers.
//!
//! Colors are stored as straight-alpha bytes and handed to drawing surfaces
//! as `0.0..=1.0` ratios.

pub mod color;

pub use color::{ByteInt, Color, ColorError, Ratio};
