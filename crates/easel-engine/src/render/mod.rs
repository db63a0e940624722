//! wgpu implementation of [`DrawSurface`](crate::surface::DrawSurface).
//!
//! Geometry is tessellated and projected to NDC on the CPU, so the shader is a
//! plain color pass-through. Each presented frame is one render pass.

mod batch;
mod immediate;
pub mod tessellate;

pub use batch::{ColorVertex, DrawRun, FrameBatch};
pub use immediate::ImmediateRenderer;
