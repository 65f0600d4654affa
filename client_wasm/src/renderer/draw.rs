use super::resources::MAX_INSTANCES;
use super::Renderer;
use crate::instances;
use shooter_core::Scene;
use wgpu::*;

pub fn draw_frame(renderer: &mut Renderer, scene: &Scene) -> Result<(), String> {
    let instance_count = update_instances(renderer, scene);

    let output = renderer
        .surface
        .get_current_texture()
        .map_err(|e| format!("Failed to get current texture: {:?}", e))?;
    let view = output.texture.create_view(&TextureViewDescriptor::default());
    let mut encoder = renderer
        .device
        .create_command_encoder(&CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

    {
        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(Color::BLACK),
                    store: StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if instance_count > 0 {
            pass.set_pipeline(&renderer.shape_pipeline);
            pass.set_bind_group(0, &renderer.camera_bind_group, &[]);
            pass.set_vertex_buffer(0, renderer.quad.vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, renderer.buffers.instances.slice(..));
            pass.set_index_buffer(renderer.quad.index_buffer.slice(..), IndexFormat::Uint16);
            pass.draw_indexed(0..renderer.quad.index_count, 0, 0..instance_count);
        }
    }

    renderer.queue.submit(std::iter::once(encoder.finish()));
    output.present();

    Ok(())
}

fn update_instances(renderer: &Renderer, scene: &Scene) -> u32 {
    let mut list = instances::build(scene);
    if list.len() > MAX_INSTANCES {
        log::warn!("{} shapes over the {MAX_INSTANCES} cap, dropping the rest", list.len());
        list.truncate(MAX_INSTANCES);
    }
    if !list.is_empty() {
        renderer
            .queue
            .write_buffer(&renderer.buffers.instances, 0, bytemuck::cast_slice(&list));
    }
    list.len() as u32
}
