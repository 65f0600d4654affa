use glam::IVec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Config, GameRng, PlayArea};

/// Ball component - one bouncing target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    pub pos: IVec2,
    pub vel: IVec2,
    pub radius: i32,
    pub color: [u8; 3], // rgb
}

impl Ball {
    pub fn new(pos: IVec2, vel: IVec2, radius: i32, color: [u8; 3]) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    /// Fresh ball with random size, position, heading and colour
    pub fn random(config: &Config, rng: &mut GameRng) -> Self {
        let area = PlayArea::from(config);
        let radius = rng.0.gen_range(config.ball_radius_min..=config.ball_radius_max);
        let max = area.max_center(radius);
        let pos = IVec2::new(
            rng.0.gen_range(radius..=max.x),
            rng.0.gen_range(radius..=max.y),
        );
        let vel = IVec2::new(
            pick_speed(&config.ball_speeds, rng),
            pick_speed(&config.ball_speeds, rng),
        );
        let lo = config.ball_color_min;
        let color = [
            rng.0.gen_range(lo..=u8::MAX),
            rng.0.gen_range(lo..=u8::MAX),
            rng.0.gen_range(lo..=u8::MAX),
        ];
        Self::new(pos, vel, radius, color)
    }

    /// Replace this ball in place with a freshly randomised one
    pub fn respawn(&mut self, config: &Config, rng: &mut GameRng) {
        *self = Self::random(config, rng);
    }
}

fn pick_speed(speeds: &[i32], rng: &mut GameRng) -> i32 {
    // Config::validate guarantees a non-empty speed set
    speeds.choose(&mut rng.0).copied().unwrap_or(crate::Params::BALL_SPEEDS[0])
}
