use serde::Deserialize;

use crate::error::{Error, Result};
use crate::gesture::GestureThresholds;
use crate::params::Params;

/// Game configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub area_width: i32,
    pub area_height: i32,
    pub ball_count: usize,
    pub ball_radius_min: i32,
    pub ball_radius_max: i32,
    pub ball_speeds: Vec<i32>,
    pub ball_color_min: u8,
    pub hit_margin: f32,
    pub cursor_smoothing: f64,
    pub gesture: GestureThresholds,
    pub round_secs: u32,
    pub hit_bonus_secs: f64,
    pub tick_ms: u32,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            area_width: Params::AREA_WIDTH,
            area_height: Params::AREA_HEIGHT,
            ball_count: Params::BALL_COUNT,
            ball_radius_min: Params::BALL_RADIUS_MIN,
            ball_radius_max: Params::BALL_RADIUS_MAX,
            ball_speeds: Params::BALL_SPEEDS.to_vec(),
            ball_color_min: Params::BALL_COLOR_MIN,
            hit_margin: Params::HIT_MARGIN,
            cursor_smoothing: Params::CURSOR_SMOOTHING,
            gesture: GestureThresholds::default(),
            round_secs: Params::ROUND_SECS,
            hit_bonus_secs: Params::HIT_BONUS_SECS,
            tick_ms: Params::TICK_MS,
            seed: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of overrides; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ball_count == 0 {
            return Err(Error::Config("ball_count must be at least 1".into()));
        }
        if self.ball_radius_min <= 0 || self.ball_radius_min > self.ball_radius_max {
            return Err(Error::Config(format!(
                "invalid radius range {}..={}",
                self.ball_radius_min, self.ball_radius_max
            )));
        }
        let span = 2 * self.ball_radius_max;
        if self.area_width < span || self.area_height < span {
            return Err(Error::Config(format!(
                "area {}x{} cannot hold a ball of radius {}",
                self.area_width, self.area_height, self.ball_radius_max
            )));
        }
        if self.ball_speeds.is_empty() || self.ball_speeds.contains(&0) {
            return Err(Error::Config("ball_speeds must be non-empty and non-zero".into()));
        }
        if !(self.cursor_smoothing > 0.0 && self.cursor_smoothing <= 1.0) {
            return Err(Error::Config(format!(
                "cursor_smoothing {} outside (0, 1]",
                self.cursor_smoothing
            )));
        }
        if self.round_secs == 0 {
            return Err(Error::Config("round_secs must be at least 1".into()));
        }
        if !(self.hit_bonus_secs.is_finite() && self.hit_bonus_secs >= 0.0) {
            return Err(Error::Config(format!(
                "hit_bonus_secs {} must be finite and not negative",
                self.hit_bonus_secs
            )));
        }
        if !(self.hit_margin.is_finite() && self.hit_margin >= 0.0) {
            return Err(Error::Config(format!(
                "hit_margin {} must be finite and not negative",
                self.hit_margin
            )));
        }
        Ok(())
    }
}
