// ABOUTME: Main GPU renderer using wgpu.
// ABOUTME: Paints a frame of colored quads (regions, then divider strips) to the window.

use std::sync::Arc;
use winit::window::Window;

use divvy_core::Color;

use crate::gpu::GpuState;
use crate::rect_pipeline::RectPipeline;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("No compatible GPU adapter found")]
    NoAdapter,

    #[error("Surface reports no supported formats")]
    UnsupportedSurface,

    #[error("Failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// A solid rectangle in window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl Quad {
    fn to_gpu(self, linear: bool) -> (f32, f32, f32, f32, [f32; 4]) {
        let color = if linear {
            self.color.to_linear()
        } else {
            [self.color.r, self.color.g, self.color.b, self.color.a]
        };
        (self.x, self.y, self.width, self.height, color)
    }
}

fn clear_color(color: Color, linear: bool) -> wgpu::Color {
    let [r, g, b, a] = if linear {
        color.to_linear()
    } else {
        [color.r, color.g, color.b, color.a]
    };
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

pub struct Renderer {
    gpu: GpuState,
    background: Color,
    rect_pipeline: RectPipeline,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, background: Color) -> Result<Self, RenderError> {
        let gpu = GpuState::new(window).await?;
        let rect_pipeline = RectPipeline::new(&gpu.device, gpu.config.format);

        let (width, height) = gpu.size;
        rect_pipeline.update_screen_size(&gpu.queue, width as f32, height as f32);

        Ok(Self {
            gpu,
            background,
            rect_pipeline,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.rect_pipeline
            .update_screen_size(&self.gpu.queue, width as f32, height as f32);
    }

    /// Get window size in pixels
    pub fn window_size(&self) -> (u32, u32) {
        self.gpu.size
    }

    /// Draw quads in order over the background color
    pub fn render(&mut self, quads: &[Quad]) -> Result<(), RenderError> {
        let linear = self.gpu.is_srgb();
        let rects: Vec<_> = quads.iter().map(|q| q.to_gpu(linear)).collect();
        self.rect_pipeline.prepare(&self.gpu.queue, &rects);

        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("Surface lost, reconfiguring");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Layout Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(self.background, linear)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.rect_pipeline.render(&mut render_pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
