//! wgpu device and window surface.
//!
//! Owns the Instance/Adapter/Device/Queue for one window, keeps the surface
//! configured across resizes and hands out per-frame encoders.

mod gpu;
mod init;

pub use gpu::{Gpu, GpuFrame, SurfaceErrorAction};
pub use init::GpuInit;
