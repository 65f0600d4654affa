/// Instanced quads in pixel space; round instances are cut to a disc or ring
pub const SHAPE_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct VertexInput {
    @location(0) position: vec2<f32>,
};

struct InstanceInput {
    @location(1) transform: vec4<f32>,
    @location(2) shape: vec4<f32>,
    @location(3) tint: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) local: vec2<f32>,
    @location(1) shape: vec4<f32>,
    @location(2) tint: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let scaled = vertex.position * instance.transform.zw;
    let c = instance.shape.x;
    let s = instance.shape.y;
    let rotated = vec2<f32>(c * scaled.x - s * scaled.y, s * scaled.x + c * scaled.y);
    let world = instance.transform.xy + rotated;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(world, 0.0, 1.0);
    out.local = vertex.position;
    out.shape = instance.shape;
    out.tint = instance.tint;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if (in.shape.w > 0.5) {
        let d = length(in.local);
        if (d > 1.0 || d < in.shape.z) {
            discard;
        }
    }
    return in.tint;
}
"#;
