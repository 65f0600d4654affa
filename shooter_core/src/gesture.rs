//! "Shoot" gesture classification from joint angles
//!
//! The gun shape is thumb bent (hammer pulled back), index straight
//! (barrel) and middle finger folded against the palm.

use glam::Vec3;
use serde::Deserialize;

use crate::hand::*;
use crate::params::Params;

/// Angle at vertex `b` between rays `b→a` and `b→c`, in degrees.
///
/// Returns 180° (straight) when either ray has zero length.
pub fn joint_angle(a: Vec3, b: Vec3, c: Vec3) -> f32 {
    let ba = a - b;
    let bc = c - b;

    let mags = ba.length() * bc.length();
    if mags == 0.0 {
        return 180.0;
    }

    let cos_angle = (ba.dot(bc) / mags).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Limits for the three joints, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    pub thumb_bent_below: f32,
    pub index_straight_above: f32,
    pub middle_bent_below: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            thumb_bent_below: Params::THUMB_BENT_BELOW,
            index_straight_above: Params::INDEX_STRAIGHT_ABOVE,
            middle_bent_below: Params::MIDDLE_BENT_BELOW,
        }
    }
}

/// Measured joint angles for one pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub thumb: f32,
    pub index: f32,
    pub middle: f32,
}

impl HandAngles {
    pub fn new(thumb: f32, index: f32, middle: f32) -> Self {
        Self {
            thumb,
            index,
            middle,
        }
    }

    pub fn from_pose(pose: &HandPose) -> Self {
        let p = |id| pose.point(id);
        Self {
            thumb: joint_angle(p(THUMB_MCP), p(THUMB_IP), p(THUMB_TIP)),
            // PIP vertex against the tip, not the DIP
            index: joint_angle(p(INDEX_MCP), p(INDEX_PIP), p(INDEX_TIP)),
            middle: joint_angle(p(MIDDLE_MCP), p(MIDDLE_PIP), p(MIDDLE_TIP)),
        }
    }

    pub fn is_shoot(&self, limits: &GestureThresholds) -> bool {
        self.thumb < limits.thumb_bent_below
            && self.index > limits.index_straight_above
            && self.middle < limits.middle_bent_below
    }
}

/// Decide whether this tick's hand (if any) is making the shoot gesture
pub fn classify(pose: Option<&HandPose>, limits: &GestureThresholds) -> bool {
    pose.map(|pose| HandAngles::from_pose(pose).is_shoot(limits))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Place three landmarks so the angle at `vertex` is `degrees`
    fn bend(points: &mut [Vec3; LANDMARK_COUNT], ids: (usize, usize, usize), origin: Vec3, degrees: f32) {
        let rad = degrees.to_radians();
        points[ids.1] = origin;
        points[ids.0] = origin + Vec3::new(0.1, 0.0, 0.0);
        points[ids.2] = origin + Vec3::new(0.1 * rad.cos(), 0.1 * rad.sin(), 0.0);
    }

    fn pose_with(thumb: f32, index: f32, middle: f32) -> HandPose {
        let mut points = [Vec3::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        bend(&mut points, (THUMB_MCP, THUMB_IP, THUMB_TIP), Vec3::new(0.2, 0.6, 0.0), thumb);
        bend(&mut points, (INDEX_MCP, INDEX_PIP, INDEX_TIP), Vec3::new(0.4, 0.4, 0.0), index);
        bend(&mut points, (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP), Vec3::new(0.6, 0.6, 0.0), middle);
        HandPose::new(points)
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(Vec3::X, Vec3::ZERO, Vec3::Y);
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_straight_line_is_180() {
        let angle = joint_angle(Vec3::new(-1.0, 0.0, 0.0), Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        assert!((angle - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_uses_depth() {
        let angle = joint_angle(Vec3::X, Vec3::ZERO, Vec3::Z);
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_vector_is_exactly_180() {
        let b = Vec3::new(0.3, 0.3, 0.1);
        assert_eq!(joint_angle(b, b, Vec3::ONE), 180.0);
        assert_eq!(joint_angle(Vec3::ONE, b, b), 180.0);
    }

    #[test]
    fn test_cosine_overshoot_is_clamped() {
        // Nearly parallel rays can push the cosine a hair past 1.0
        let angle = joint_angle(Vec3::new(1e-3, 1e-3, 0.0), Vec3::ZERO, Vec3::new(3e-3, 3e-3, 0.0));
        assert!(angle.is_finite());
        assert!(angle < 1e-1);
    }

    #[test]
    fn test_thresholds_exact() {
        let limits = GestureThresholds::default();
        assert!(HandAngles::new(149.0, 101.0, 149.0).is_shoot(&limits));
        assert!(!HandAngles::new(151.0, 101.0, 149.0).is_shoot(&limits));
        assert!(!HandAngles::new(149.0, 99.0, 149.0).is_shoot(&limits));
        assert!(!HandAngles::new(149.0, 101.0, 151.0).is_shoot(&limits));
    }

    #[test]
    fn test_thresholds_are_strict() {
        let limits = GestureThresholds::default();
        assert!(!HandAngles::new(150.0, 101.0, 149.0).is_shoot(&limits));
        assert!(!HandAngles::new(149.0, 100.0, 149.0).is_shoot(&limits));
        assert!(!HandAngles::new(149.0, 101.0, 150.0).is_shoot(&limits));
    }

    #[test]
    fn test_from_pose_picks_expected_joints() {
        let angles = HandAngles::from_pose(&pose_with(90.0, 170.0, 60.0));
        assert!((angles.thumb - 90.0).abs() < 0.01);
        assert!((angles.index - 170.0).abs() < 0.01);
        assert!((angles.middle - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_classify_gun_pose() {
        let limits = GestureThresholds::default();
        assert!(classify(Some(&pose_with(120.0, 170.0, 45.0)), &limits));
    }

    #[test]
    fn test_classify_open_hand_is_not_a_shot() {
        let limits = GestureThresholds::default();
        assert!(!classify(Some(&pose_with(175.0, 175.0, 175.0)), &limits));
    }

    #[test]
    fn test_classify_fist_is_not_a_shot() {
        let limits = GestureThresholds::default();
        assert!(!classify(Some(&pose_with(60.0, 40.0, 40.0)), &limits));
    }

    #[test]
    fn test_missing_hand_never_shoots() {
        assert!(!classify(None, &GestureThresholds::default()));
    }
}
