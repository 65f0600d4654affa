use super::shaders::SHAPE_SHADER;
use crate::instances::InstanceData;
use crate::mesh::Vertex;
use wgpu::*;

pub struct PipelineState {
    pub shape_pipeline: RenderPipeline,
    pub camera_layout: BindGroupLayout,
}

const PRIMITIVE: PrimitiveState = PrimitiveState {
    topology: PrimitiveTopology::TriangleList,
    strip_index_format: None,
    front_face: FrontFace::Ccw,
    cull_mode: None,
    unclipped_depth: false,
    polygon_mode: PolygonMode::Fill,
    conservative: false,
};

pub fn create_pipelines(device: &Device, format: TextureFormat) -> PipelineState {
    // 1. Camera Bind Group Layout
    let camera_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("Camera Bind Group Layout"),
        entries: &[BindGroupLayoutEntry {
            binding: 0,
            visibility: ShaderStages::VERTEX,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    // 2. Shape pipeline: unit quad per instance
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("Shape Shader"),
        source: ShaderSource::Wgsl(SHAPE_SHADER.into()),
    });

    let shape_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("Shape Pipeline Layout"),
        bind_group_layouts: &[&camera_layout],
        push_constant_ranges: &[],
    });

    let vertex_buffer_layout = VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &[VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: VertexFormat::Float32x2,
        }],
    };

    let vec4 = std::mem::size_of::<[f32; 4]>() as u64;
    let instance_buffer_layout = VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceData>() as u64,
        step_mode: VertexStepMode::Instance,
        attributes: &[
            VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: VertexFormat::Float32x4, // transform
            },
            VertexAttribute {
                offset: vec4,
                shader_location: 2,
                format: VertexFormat::Float32x4, // shape
            },
            VertexAttribute {
                offset: vec4 * 2,
                shader_location: 3,
                format: VertexFormat::Float32x4, // tint
            },
        ],
    };

    let shape_pipeline = build(
        device,
        "Shape Pipeline",
        &shape_layout,
        &shader,
        &[vertex_buffer_layout, instance_buffer_layout],
        PRIMITIVE,
        ColorTargetState {
            format,
            blend: Some(BlendState::ALPHA_BLENDING),
            write_mask: ColorWrites::ALL,
        },
    );

    PipelineState {
        shape_pipeline,
        camera_layout,
    }
}

/// Render pipeline with `vs_main`/`fs_main` entry points and a single colour target
fn build(
    device: &Device,
    label: &str,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    buffers: &[VertexBufferLayout],
    primitive: PrimitiveState,
    target: ColorTargetState,
) -> RenderPipeline {
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(target)],
            compilation_options: Default::default(),
        }),
        primitive,
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
