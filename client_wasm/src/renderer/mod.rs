pub mod draw;
pub mod init;
pub mod pipeline;
pub mod resources;
pub mod shaders;

use crate::camera::Camera;
use crate::mesh::{create_quad, Mesh};
use resources::GameBuffers;
use shooter_core::Scene;
use web_sys::HtmlCanvasElement;
use wgpu::*;

pub struct Renderer {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,
    pub size: (u32, u32),

    // Pipelines
    pub shape_pipeline: RenderPipeline,

    // Bind Groups
    pub camera_bind_group: BindGroup,

    // Resources
    pub buffers: GameBuffers,
    pub quad: Mesh,
}

impl Renderer {
    /// Set up WebGPU on `canvas` for a `width` x `height` pixel play area
    pub async fn new(canvas: HtmlCanvasElement, width: u32, height: u32) -> Result<Self, String> {
        let ctx = init::GpuContext::connect(canvas).await?;
        let camera = Camera::pixel_space(width as f32, height as f32);

        let buffers = resources::create_buffers(&ctx.device, &camera);
        let pipes = pipeline::create_pipelines(&ctx.device, ctx.config.format);
        let quad = create_quad(&ctx.device, &ctx.queue);

        let camera_bind_group = ctx.device.create_bind_group(&BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &pipes.camera_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffers.camera.as_entire_binding(),
            }],
        });

        log::info!(
            "renderer ready: surface {}x{} {:?}",
            ctx.size.0,
            ctx.size.1,
            ctx.config.format
        );

        Ok(Self {
            device: ctx.device,
            queue: ctx.queue,
            surface: ctx.surface,
            surface_config: ctx.config,
            size: ctx.size,
            shape_pipeline: pipes.shape_pipeline,
            camera_bind_group,
            buffers,
            quad,
        })
    }

    pub fn draw(&mut self, scene: &Scene) -> Result<(), String> {
        draw::draw_frame(self, scene)
    }
}
