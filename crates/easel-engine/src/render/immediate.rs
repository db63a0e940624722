use crate::coords::{Ortho, Viewport};
use crate::device::{Gpu, SurfaceErrorAction};
use crate::paint::Ratio;
use crate::surface::{Blend, ClearMask, DrawSurface, Primitive};

use super::batch::{ColorVertex, DrawRun, FrameBatch};

const MIN_VERTEX_CAPACITY: usize = 1024;

/// wgpu renderer for the immediate-mode [`DrawSurface`] calls.
///
/// Calls are accumulated in a [`FrameBatch`] and sent to the GPU in a single
/// render pass by [`flush`](Self::flush) when the frame is presented.
#[derive(Debug, Default)]
pub struct ImmediateRenderer {
    batch: FrameBatch,

    pipeline_format: Option<wgpu::TextureFormat>,
    alpha_pipeline: Option<wgpu::RenderPipeline>,
    replace_pipeline: Option<wgpu::RenderPipeline>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

impl ImmediateRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch(&self) -> &FrameBatch {
        &self.batch
    }

    /// Renders and presents the recorded frame, then starts a new one.
    ///
    /// Nothing is submitted while the window has no drawable area. The
    /// recorded frame is dropped either way.
    pub fn flush(&mut self, gpu: &mut Gpu<'_>) -> Result<(), SurfaceErrorAction> {
        let result = self.render(gpu);
        self.batch.reset_frame();
        result
    }

    fn render(&mut self, gpu: &mut Gpu<'_>) -> Result<(), SurfaceErrorAction> {
        if !gpu.is_drawable() || self.batch.is_empty() {
            return Ok(());
        }

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("failed to acquire surface texture: {err}");
                return Err(gpu.handle_surface_error(err));
            }
        };

        self.ensure_pipelines(gpu);
        self.upload(gpu);

        let load = match self.batch.clear_request() {
            Some([r, g, b, a]) => wgpu::LoadOp::Clear(wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            }),
            None => wgpu::LoadOp::Load,
        };

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("easel immediate pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(vbo) = self.vbo.as_ref() {
                rpass.set_vertex_buffer(0, vbo.slice(..));
                let target = gpu.size();

                for run in self.batch.runs() {
                    let Some(pipeline) = self.pipeline(run.blend) else { continue };
                    let Some((x, y, w, h)) = clamp_viewport(run, target.width, target.height)
                    else {
                        continue;
                    };
                    rpass.set_pipeline(pipeline);
                    rpass.set_viewport(x, y, w, h, 0.0, 1.0);
                    rpass.draw(run.vertices.clone(), 0..1);
                }
            }
        }

        gpu.submit(frame);
        Ok(())
    }

    fn pipeline(&self, blend: Blend) -> Option<&wgpu::RenderPipeline> {
        match blend {
            Blend::Alpha => self.alpha_pipeline.as_ref(),
            Blend::Replace => self.replace_pipeline.as_ref(),
        }
    }

    fn ensure_pipelines(&mut self, gpu: &Gpu<'_>) {
        let format = gpu.surface_format();
        if self.pipeline_format == Some(format) && self.alpha_pipeline.is_some() {
            return;
        }

        let device = gpu.device();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("easel immediate shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/immediate.wgsl").into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("easel immediate pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let build = |label: &str, blend: wgpu::BlendState| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[ColorVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.alpha_pipeline = Some(build("easel alpha pipeline", wgpu::BlendState::ALPHA_BLENDING));
        self.replace_pipeline = Some(build("easel replace pipeline", wgpu::BlendState::REPLACE));
        self.pipeline_format = Some(format);

        log::debug!("immediate pipelines built for {format:?}");
    }

    fn upload(&mut self, gpu: &Gpu<'_>) {
        let len = self.batch.vertices().len();
        if len == 0 {
            return;
        }

        self.ensure_vertex_capacity(gpu, len);
        if let Some(vbo) = self.vbo.as_ref() {
            gpu.queue()
                .write_buffer(vbo, 0, bytemuck::cast_slice(self.batch.vertices()));
        }
    }

    fn ensure_vertex_capacity(&mut self, gpu: &Gpu<'_>, required: usize) {
        let current = self.vbo.as_ref().map(|_| self.vbo_capacity);
        let Some(new_cap) = grown_capacity(current, required) else { return };
        let new_size = (new_cap * std::mem::size_of::<ColorVertex>()) as u64;
        self.vbo = Some(gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("easel immediate vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}

/// New vertex buffer capacity when `required` vertices do not fit in the
/// `current` buffer (`None` when there is no buffer yet).
fn grown_capacity(current: Option<usize>, required: usize) -> Option<usize> {
    match current {
        Some(cap) if required <= cap => None,
        _ => Some(required.next_power_of_two().max(MIN_VERTEX_CAPACITY)),
    }
}

/// Converts a run's bottom-left viewport to a top-left one clipped to the
/// render target. `None` when nothing of it is visible.
fn clamp_viewport(run: &DrawRun, target_w: u32, target_h: u32) -> Option<(f32, f32, f32, f32)> {
    let (x, y, w, h) = run.viewport.to_top_left(target_h);
    let (tw, th) = (target_w as f32, target_h as f32);

    let x0 = x.clamp(0.0, tw);
    let y0 = y.clamp(0.0, th);
    let x1 = (x + w).clamp(0.0, tw);
    let y1 = (y + h).clamp(0.0, th);

    (x1 > x0 && y1 > y0).then_some((x0, y0, x1 - x0, y1 - y0))
}

impl DrawSurface for ImmediateRenderer {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.batch.set_viewport(viewport);
    }

    fn load_identity(&mut self) {
        self.batch.load_identity();
    }

    fn set_projection(&mut self, projection: Ortho) {
        self.batch.set_projection(projection);
    }

    fn set_clear_color(&mut self, color: [Ratio; 4]) {
        self.batch.set_clear_color(color);
    }

    fn clear(&mut self, mask: ClearMask) {
        self.batch.clear(mask);
    }

    fn set_blend(&mut self, blend: Blend) {
        self.batch.set_blend(blend);
    }

    fn set_color(&mut self, color: [Ratio; 4]) {
        self.batch.set_color(color);
    }

    fn set_line_width(&mut self, width: f32) {
        self.batch.set_line_width(width);
    }

    fn begin(&mut self, primitive: Primitive) {
        self.batch.begin(primitive);
    }

    fn vertex(&mut self, x: f32, y: f32) {
        self.batch.vertex(x, y);
    }

    fn end(&mut self) {
        self.batch.end();
    }
}
