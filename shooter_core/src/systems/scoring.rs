use crate::{Config, Countdown, Events, Score};

/// Credit this tick's hits: one point and one time bonus per ball
pub fn apply_hits(events: &Events, config: &Config, score: &mut Score, countdown: &mut Countdown) {
    for _ in 0..events.balls_hit {
        score.add(1);
        countdown.extend(config.hit_bonus_secs);
    }
    if events.balls_hit > 0 {
        log::debug!(
            "{} ball(s) hit, score {}, anchor {:.2}",
            events.balls_hit,
            score.points,
            countdown.anchor
        );
    }
}
