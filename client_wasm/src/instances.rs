//! Scene shapes flattened into GPU instances
//!
//! Every shape is drawn as one unit quad. Discs and rings are cut out of it
//! in the fragment shader; lines are the quad stretched and rotated.

use glam::Vec2;
use shooter_core::scene::{Rgb, Scene, Shape};

/// Instance data for rendering (matches shader InstanceInput).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub transform: [f32; 4], // x, y, half_w, half_h
    pub shape: [f32; 4],     // cos, sin, inner radius (fraction of outer), round
    pub tint: [f32; 4],      // rgba
}

impl InstanceData {
    fn round(center: Vec2, outer: f32, inner: f32, color: Rgb) -> Self {
        let inner = if outer > 0.0 { (inner / outer).max(0.0) } else { 0.0 };
        Self {
            transform: [center.x, center.y, outer, outer],
            shape: [1.0, 0.0, inner, 1.0],
            tint: tint(color, 1.0),
        }
    }

    fn segment(from: Vec2, to: Vec2, width: f32, color: Rgb) -> Self {
        let dir = to - from;
        let len = dir.length();
        let (cos, sin) = if len > 0.0 {
            (dir.x / len, dir.y / len)
        } else {
            (1.0, 0.0)
        };
        let center = (from + to) * 0.5;
        let half_w = width * 0.5;
        Self {
            transform: [center.x, center.y, len * 0.5 + half_w, half_w],
            shape: [cos, sin, 0.0, 0.0],
            tint: tint(color, 1.0),
        }
    }

    /// Axis-aligned rectangle covering `size` pixels from the origin
    pub fn sheet(size: Vec2, color: Rgb, alpha: f32) -> Self {
        let half = size * 0.5;
        Self {
            transform: [half.x, half.y, half.x, half.y],
            shape: [1.0, 0.0, 0.0, 0.0],
            tint: tint(color, alpha),
        }
    }
}

impl From<&Shape> for InstanceData {
    fn from(shape: &Shape) -> Self {
        match *shape {
            Shape::Disc {
                center,
                radius,
                color,
            } => Self::round(center, radius, 0.0, color),
            Shape::Ring {
                center,
                radius,
                width,
                color,
            } => Self::round(center, radius + width * 0.5, radius - width * 0.5, color),
            Shape::Line {
                from,
                to,
                width,
                color,
            } => Self::segment(from, to, width, color),
        }
    }
}

fn tint(color: Rgb, alpha: f32) -> [f32; 4] {
    [
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
        alpha,
    ]
}

/// Draw list for one frame, back to front
pub fn build(scene: &Scene) -> Vec<InstanceData> {
    let mut out: Vec<InstanceData> = scene.shapes.iter().map(InstanceData::from).collect();
    if let Some(over) = &scene.game_over {
        let size = Vec2::new(scene.area.width as f32, scene.area.height as f32);
        out.push(InstanceData::sheet(size, shooter_core::scene::colors::BLACK, over.shade));
    }
    out
}
