//! Camera for the game view
//!
//! Orthographic, in play-area pixels with the origin top-left and y down

use glam::Mat4;

/// Camera struct
pub struct Camera {
    pub projection: Mat4,
}

impl Camera {
    /// Map `(0, 0)..(width, height)` pixels onto clip space
    pub fn pixel_space(width: f32, height: f32) -> Self {
        let projection = Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0);
        Self { projection }
    }
}

/// Camera uniform data (matches WGSL struct, 256-byte aligned)
#[repr(C, align(256))]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4], // 64 bytes (mat4x4)
    _padding: [f32; 48],      // pad to 256 bytes
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.projection.to_cols_array_2d(),
            _padding: [0.0; 48],
        }
    }
}
