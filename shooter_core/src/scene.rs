//! Render lists for the game view and the camera preview
//!
//! Plain data, drawn by whatever display the host provides.

use glam::{IVec2, Vec2};
use hecs::World;

use crate::hand::{HandPose, HAND_CONNECTIONS};
use crate::{Ball, PlayArea};

pub type Rgb = [u8; 3];

pub mod colors {
    use super::Rgb;

    pub const RED: Rgb = [255, 0, 0];
    pub const CYAN: Rgb = [0, 255, 255];
    pub const WHITE: Rgb = [255, 255, 255];
    pub const YELLOW: Rgb = [255, 255, 0];
    pub const BLUE: Rgb = [0, 0, 255];
    pub const GREEN: Rgb = [0, 255, 0];
    pub const BLACK: Rgb = [0, 0, 0];
}

const CROSSHAIR_IDLE_RADIUS: f32 = 14.0;
const CROSSHAIR_FIRING_RADIUS: f32 = 18.0;
const CROSSHAIR_STROKE: f32 = 2.0;
const CROSSHAIR_DOT: f32 = 3.0;
const SKELETON_STROKE: f32 = 2.0;
const JOINT_RADIUS: f32 = 5.0;
const GAME_OVER_SHADE: f32 = 0.7;

/// A single primitive in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Disc {
        center: Vec2,
        radius: f32,
        color: Rgb,
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgb,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgb,
    },
}

/// A line of overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub color: Rgb,
}

/// Terminal overlay shown once the round is over
#[derive(Debug, Clone, PartialEq)]
pub struct GameOver {
    /// Opacity of the black sheet drawn over the play area
    pub shade: f32,
    pub title: Label,
    pub detail: Label,
}

/// Everything needed to draw one frame of the game view
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub area: PlayArea,
    pub shapes: Vec<Shape>,
    pub hud: Vec<Label>,
    pub game_over: Option<GameOver>,
}

impl Scene {
    /// Live view: balls, crosshair and HUD
    pub fn playing(
        world: &World,
        area: PlayArea,
        cursor: IVec2,
        firing: bool,
        score: u32,
        time_left: u32,
    ) -> Self {
        let mut shapes: Vec<Shape> = world
            .query::<&Ball>()
            .iter()
            .map(|(_e, ball)| Shape::Disc {
                center: ball.pos.as_vec2(),
                radius: ball.radius as f32,
                color: ball.color,
            })
            .collect();
        shapes.extend(crosshair(cursor, firing));

        Self {
            area,
            shapes,
            hud: hud(score, time_left),
            game_over: None,
        }
    }

    /// Terminal view with the final score
    pub fn finished(area: PlayArea, score: u32) -> Self {
        Self {
            area,
            shapes: Vec::new(),
            hud: Vec::new(),
            game_over: Some(GameOver {
                shade: GAME_OVER_SHADE,
                title: Label {
                    text: "GAME OVER".to_string(),
                    color: colors::RED,
                },
                detail: Label {
                    text: format!("Final Score: {score}"),
                    color: colors::WHITE,
                },
            }),
        }
    }
}

fn hud(score: u32, time_left: u32) -> Vec<Label> {
    vec![
        Label {
            text: format!("Score: {score}"),
            color: colors::WHITE,
        },
        Label {
            text: format!("Time: {time_left}"),
            color: colors::YELLOW,
        },
    ]
}

/// Ring, cross and centre dot; larger and red while firing
pub fn crosshair(at: IVec2, firing: bool) -> [Shape; 4] {
    let (color, radius) = if firing {
        (colors::RED, CROSSHAIR_FIRING_RADIUS)
    } else {
        (colors::CYAN, CROSSHAIR_IDLE_RADIUS)
    };
    let center = at.as_vec2();

    [
        Shape::Ring {
            center,
            radius,
            width: CROSSHAIR_STROKE,
            color,
        },
        Shape::Line {
            from: center - Vec2::new(radius, 0.0),
            to: center + Vec2::new(radius, 0.0),
            width: CROSSHAIR_STROKE,
            color,
        },
        Shape::Line {
            from: center - Vec2::new(0.0, radius),
            to: center + Vec2::new(0.0, radius),
            width: CROSSHAIR_STROKE,
            color,
        },
        Shape::Disc {
            center,
            radius: CROSSHAIR_DOT,
            color,
        },
    ]
}

/// Skeleton bones and joints for the camera preview, in `area` pixels
pub fn annotate_preview(pose: &HandPose, area: &PlayArea) -> Vec<Shape> {
    let joint = |id: usize| pose.to_screen(id, area).as_vec2();

    let bones = HAND_CONNECTIONS.iter().map(|&(a, b)| Shape::Line {
        from: joint(a),
        to: joint(b),
        width: SKELETON_STROKE,
        color: colors::BLUE,
    });
    let joints = (0..pose.points().len()).map(|id| Shape::Disc {
        center: joint(id),
        radius: JOINT_RADIUS,
        color: colors::GREEN,
    });

    bones.chain(joints).collect()
}
