/// Wall-clock time for one tick, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    pub now: f64,
}

impl Time {
    pub fn new(now: f64) -> Self {
        Self { now }
    }

    /// Milliseconds since the clock origin, for landmark timestamps
    pub fn as_millis(&self) -> u64 {
        (self.now * 1000.0).max(0.0) as u64
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, hits: u32) {
        self.points += hits;
    }

    pub fn reset(&mut self) {
        self.points = 0;
    }
}

/// Round timer anchored to a start instant; hits push the anchor forward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    pub anchor: f64,
    pub duration: u32,
}

impl Countdown {
    pub fn new(anchor: f64, duration: u32) -> Self {
        Self { anchor, duration }
    }

    /// Whole seconds remaining, never negative
    pub fn time_left(&self, now: f64) -> u32 {
        let elapsed = (now - self.anchor).floor();
        let left = self.duration as f64 - elapsed;
        left.clamp(0.0, u32::MAX as f64) as u32
    }

    pub fn is_expired(&self, now: f64) -> bool {
        self.time_left(now) == 0
    }

    /// Extend the deadline by `secs`
    pub fn extend(&mut self, secs: f64) {
        self.anchor += secs;
    }

    pub fn restart(&mut self, now: f64, duration: u32) {
        self.anchor = now;
        self.duration = duration;
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::new).unwrap_or_else(Self::from_entropy)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub hand_seen: bool,
    pub shot_fired: bool,
    pub balls_hit: u32,
    pub wall_bounces: u32,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.hand_seen = false;
        self.shot_fired = false;
        self.balls_hit = 0;
        self.wall_bounces = 0;
    }
}
