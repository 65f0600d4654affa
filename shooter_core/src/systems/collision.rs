use crate::{Ball, Events, PlayArea};
use hecs::World;

/// Reflect balls that have moved past a wall.
///
/// A ball whose centre is strictly outside `[radius, bound - radius]` on an
/// axis has that velocity component negated. Position is not clamped, so a
/// ball may sit up to one tick's speed past the wall until the next move
/// brings it back.
pub fn bounce_walls(world: &mut World, area: &PlayArea, events: &mut Events) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let max = area.max_center(ball.radius);

        if ball.pos.x < ball.radius || ball.pos.x > max.x {
            ball.vel.x = -ball.vel.x;
            events.wall_bounces += 1;
        }
        if ball.pos.y < ball.radius || ball.pos.y > max.y {
            ball.vel.y = -ball.vel.y;
            events.wall_bounces += 1;
        }
    }
}
