use crate::gesture::classify;
use crate::hand::HandPose;
use crate::{Config, Cursor, Events, PlayArea};

/// Apply this tick's hand (if any): steer the cursor and decide whether a shot fired.
///
/// With no hand the cursor keeps its last position and nothing fires.
pub fn ingest_pose(
    pose: Option<&HandPose>,
    area: &PlayArea,
    config: &Config,
    cursor: &mut Cursor,
    events: &mut Events,
) {
    let Some(pose) = pose else {
        return;
    };

    events.hand_seen = true;
    cursor.track(pose.index_tip(area));
    events.shot_fired = classify(Some(pose), &config.gesture);
}
