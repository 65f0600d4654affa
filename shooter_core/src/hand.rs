//! Hand landmark model
//!
//! 21 keypoints in the MediaPipe hand topology. x and y are normalised to
//! the frame, z is depth relative to the wrist.

use glam::{IVec2, Vec3};

use crate::error::PoseError;
use crate::map::PlayArea;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Skeleton edges drawn over the camera preview
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (WRIST, PINKY_MCP),
];

/// One detected hand for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    points: [Vec3; LANDMARK_COUNT],
}

impl HandPose {
    pub fn new(points: [Vec3; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a flat `[x0, y0, z0, x1, ...]` buffer as handed over from JS
    pub fn from_flat(data: &[f32]) -> Result<Self, PoseError> {
        let expected = LANDMARK_COUNT * 3;
        if data.len() != expected {
            return Err(PoseError::Length {
                expected,
                got: data.len(),
            });
        }

        let mut points = [Vec3::ZERO; LANDMARK_COUNT];
        for (i, chunk) in data.chunks_exact(3).enumerate() {
            let point = Vec3::new(chunk[0], chunk[1], chunk[2]);
            if !point.is_finite() {
                return Err(PoseError::NonFinite(i));
            }
            points[i] = point;
        }
        Ok(Self { points })
    }

    pub fn point(&self, id: usize) -> Vec3 {
        self.points[id]
    }

    pub fn points(&self) -> &[Vec3; LANDMARK_COUNT] {
        &self.points
    }

    /// Landmark `id` in pixel space of `area`
    pub fn to_screen(&self, id: usize, area: &PlayArea) -> IVec2 {
        area.to_pixel(self.points[id])
    }

    pub fn index_tip(&self, area: &PlayArea) -> IVec2 {
        self.to_screen(INDEX_TIP, area)
    }
}
