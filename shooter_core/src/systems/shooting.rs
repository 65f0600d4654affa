use crate::{Ball, Config, Cursor, Events, GameRng};
use glam::IVec2;
use hecs::World;

/// True if a shot at `aim` lands on `ball`, allowing `margin` pixels of slack
pub fn is_hit(ball: &Ball, aim: IVec2, margin: f32) -> bool {
    let distance = (ball.pos - aim).as_vec2().length();
    distance < ball.radius as f32 + margin
}

/// Resolve a fired shot against every ball.
///
/// Each ball under the crosshair is respawned in place and counted once;
/// several balls can fall to the same shot.
pub fn resolve_shot(
    world: &mut World,
    cursor: &Cursor,
    config: &Config,
    rng: &mut GameRng,
    events: &mut Events,
) {
    if !events.shot_fired {
        return;
    }

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if is_hit(ball, cursor.pos, config.hit_margin) {
            ball.respawn(config, rng);
            events.balls_hit += 1;
        }
    }
}
