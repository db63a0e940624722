/// Parameters for [`Gpu`](super::Gpu) creation.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one is offered.
    ///
    /// Off by default: canvas colors are byte values written to the
    /// framebuffer unconverted, so a linear (`*Unorm`) format is preferred.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Requested alpha compositing mode. Falls back to the first supported one.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on the platform.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Requests a compositor-blended surface, used for transparent canvases.
    pub fn transparent(mut self) -> Self {
        self.alpha_mode = Some(wgpu::CompositeAlphaMode::PreMultiplied);
        self
    }
}
