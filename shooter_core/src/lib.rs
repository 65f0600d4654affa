pub mod components;
pub mod config;
pub mod cursor;
pub mod error;
pub mod fsm;
pub mod gesture;
pub mod hand;
pub mod map;
pub mod params;
pub mod resources;
pub mod scene;
pub mod session;
pub mod systems;

pub use components::*;
pub use config::*;
pub use cursor::*;
pub use error::{CaptureError, Error, PoseError, Result};
pub use fsm::{SessionAction, SessionFsm, SessionState, TransitionResult};
pub use hand::HandPose;
pub use map::*;
pub use params::*;
pub use resources::*;
pub use scene::{Scene, Shape};
pub use session::{Capture, Display, FrameStream, GameSession, LandmarkSource, TickOutcome};

use hecs::World;
use systems::*;

/// Run one tick of the ball field against this tick's hand pose
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    pose: Option<&HandPose>,
    area: &PlayArea,
    config: &Config,
    cursor: &mut Cursor,
    score: &mut Score,
    countdown: &mut Countdown,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Clear events at start of tick
    events.clear();

    // 1. Steer cursor and classify the gesture
    ingest_pose(pose, area, config, cursor, events);

    // 2. Move balls
    move_balls(world);

    // 3. Reflect off walls
    bounce_walls(world, area, events);

    // 4. Hit-test the shot, respawning hit balls
    resolve_shot(world, cursor, config, rng, events);

    // 5. Credit hits to score and timer
    apply_hits(events, config, score, countdown);
}

/// Helper to create a ball entity
pub fn create_ball(world: &mut World, ball: Ball) -> hecs::Entity {
    world.spawn((ball,))
}

/// Populate the field with `config.ball_count` random balls
pub fn spawn_field(world: &mut World, config: &Config, rng: &mut GameRng) {
    for _ in 0..config.ball_count {
        create_ball(world, Ball::random(config, rng));
    }
    log::debug!("spawned {} balls", config.ball_count);
}
