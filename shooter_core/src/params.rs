/// Game tuning parameters for the hand-gun shooter
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Play area (pixels)
    pub const AREA_WIDTH: i32 = 900;
    pub const AREA_HEIGHT: i32 = 600;

    // Balls
    pub const BALL_COUNT: usize = 5;
    pub const BALL_RADIUS_MIN: i32 = 20;
    pub const BALL_RADIUS_MAX: i32 = 35;
    pub const BALL_SPEEDS: [i32; 4] = [-4, -3, 3, 4];
    pub const BALL_COLOR_MIN: u8 = 50;

    // Shooting
    pub const HIT_MARGIN: f32 = 25.0;
    pub const CURSOR_SMOOTHING: f64 = 0.3;

    // Gesture thresholds (degrees)
    pub const THUMB_BENT_BELOW: f32 = 150.0;
    pub const INDEX_STRAIGHT_ABOVE: f32 = 100.0;
    pub const MIDDLE_BENT_BELOW: f32 = 150.0;

    // Timer
    pub const ROUND_SECS: u32 = 10;
    pub const HIT_BONUS_SECS: f64 = 2.0;

    // Loop pacing
    pub const TICK_MS: u32 = 20; // ~50 ticks per second
}
