use glam::{IVec2, Vec3};
use hecs::World;
use shooter_core::hand::{
    HandPose, INDEX_DIP, INDEX_MCP, INDEX_PIP, INDEX_TIP, LANDMARK_COUNT, MIDDLE_MCP, MIDDLE_PIP,
    MIDDLE_TIP, THUMB_IP, THUMB_MCP, THUMB_TIP,
};
use shooter_core::*;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Hand making a gun with the index fingertip at `tip` (normalised coordinates)
fn gun_pose(tip: Vec3) -> HandPose {
    let mut points = [tip; LANDMARK_COUNT];
    let d = 0.02;

    // Thumb bent 90°
    points[THUMB_MCP] = tip + Vec3::new(0.0, 2.0 * d, 0.0);
    points[THUMB_IP] = tip + Vec3::new(d, 2.0 * d, 0.0);
    points[THUMB_TIP] = tip + Vec3::new(d, 3.0 * d, 0.0);

    // Index straight, pointing at the tip
    points[INDEX_MCP] = tip + Vec3::new(0.0, 3.0 * d, 0.0);
    points[INDEX_PIP] = tip + Vec3::new(0.0, 2.0 * d, 0.0);
    points[INDEX_DIP] = tip + Vec3::new(0.0, d, 0.0);
    points[INDEX_TIP] = tip;

    // Middle curled 90°
    points[MIDDLE_MCP] = tip + Vec3::new(-d, 3.0 * d, 0.0);
    points[MIDDLE_PIP] = tip + Vec3::new(-d, 2.0 * d, 0.0);
    points[MIDDLE_TIP] = tip + Vec3::new(-2.0 * d, 2.0 * d, 0.0);

    HandPose::new(points)
}

fn centre_tip() -> Vec3 {
    Vec3::new(0.5, 0.5, 0.0)
}

type Read = std::result::Result<Option<u32>, CaptureError>;

/// Numbered frames, unless a read has been queued in `script`
struct ScriptedStream {
    open: Rc<Cell<i32>>,
    frames: Rc<Cell<u32>>,
    script: Rc<RefCell<VecDeque<Read>>>,
}

impl FrameStream for ScriptedStream {
    type Frame = u32;

    fn read(&mut self) -> Read {
        if let Some(read) = self.script.borrow_mut().pop_front() {
            return read;
        }
        let n = self.frames.get();
        self.frames.set(n + 1);
        Ok(Some(n))
    }
}

impl Drop for ScriptedStream {
    fn drop(&mut self) {
        self.open.set(self.open.get() - 1);
    }
}

#[derive(Default)]
struct ScriptedCapture {
    open: Rc<Cell<i32>>,
    frames: Rc<Cell<u32>>,
    script: Rc<RefCell<VecDeque<Read>>>,
}

impl Capture for ScriptedCapture {
    type Stream = ScriptedStream;

    fn open(&mut self) -> std::result::Result<ScriptedStream, CaptureError> {
        self.open.set(self.open.get() + 1);
        Ok(ScriptedStream {
            open: self.open.clone(),
            frames: self.frames.clone(),
            script: self.script.clone(),
        })
    }
}

/// Plays back a fixed pose (or none) and records timestamps
struct ScriptedHand {
    pose: Rc<RefCell<Option<HandPose>>>,
    timestamps: Rc<RefCell<Vec<u64>>>,
}

impl LandmarkSource<u32> for ScriptedHand {
    fn detect(&mut self, _frame: &u32, timestamp_ms: u64) -> Option<HandPose> {
        self.timestamps.borrow_mut().push(timestamp_ms);
        *self.pose.borrow()
    }
}

#[derive(Default)]
struct RecordingDisplay {
    scenes: Vec<Scene>,
    previews: Vec<usize>,
}

impl Display<u32> for RecordingDisplay {
    fn present(&mut self, scene: &Scene, _frame: Option<&u32>, preview: &[Shape]) {
        self.scenes.push(scene.clone());
        self.previews.push(preview.len());
    }
}

struct Harness {
    session: GameSession<ScriptedCapture, ScriptedHand>,
    open: Rc<Cell<i32>>,
    script: Rc<RefCell<VecDeque<Read>>>,
    pose: Rc<RefCell<Option<HandPose>>>,
    timestamps: Rc<RefCell<Vec<u64>>>,
}

fn harness() -> Harness {
    let capture = ScriptedCapture::default();
    let open = capture.open.clone();
    let script = capture.script.clone();
    let pose = Rc::new(RefCell::new(None));
    let timestamps = Rc::new(RefCell::new(Vec::new()));
    let hand = ScriptedHand {
        pose: pose.clone(),
        timestamps: timestamps.clone(),
    };
    let config = Config {
        seed: Some(42),
        ..Config::default()
    };

    Harness {
        session: GameSession::new(config, capture, hand).unwrap(),
        open,
        script,
        pose,
        timestamps,
    }
}

fn ball_states(world: &World) -> Vec<(IVec2, IVec2)> {
    world
        .query::<&Ball>()
        .iter()
        .map(|(_e, ball)| (ball.pos, ball.vel))
        .collect()
}

#[test]
fn test_idle_round_runs_out_after_ten_seconds() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();
    h.session.start(0.0).unwrap();

    // First frame at t=0 starts the clock
    let mut finished = None;
    for i in 0..=600 {
        match h.session.tick(i as f64 * 0.02, &mut display) {
            TickOutcome::Running { shot_fired, .. } => assert!(!shot_fired),
            TickOutcome::Finished { score } => {
                finished = Some((i, score));
                break;
            }
            other => panic!("unexpected {other:?} at tick {i}"),
        }
    }

    // 10.0 s is reached on tick 500
    assert_eq!(finished, Some((500, 0)));
    assert_eq!(h.session.state(), SessionState::Over);
    assert_eq!(h.open.get(), 0);

    let last = display.scenes.last().unwrap();
    assert!(last.game_over.is_some());
    assert!(display.previews.iter().all(|&n| n == 0));
}

#[test]
fn test_balls_stay_in_bounds_for_a_whole_round() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();
    h.session.start(0.0).unwrap();

    for i in 1..500 {
        h.session.tick(i as f64 * 0.02, &mut display);
        for (_e, ball) in h.session.world().query::<&Ball>().iter() {
            let max = PlayArea::default().max_center(ball.radius);
            assert!(ball.pos.x >= ball.radius - 4 && ball.pos.x <= max.x + 4);
            assert!(ball.pos.y >= ball.radius - 4 && ball.pos.y <= max.y + 4);
        }
    }
}

#[test]
fn test_gun_over_ball_scores_and_extends_timer() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();

    // One slow ball right under the crosshair's starting point
    let world = h.session.world_mut();
    world.clear();
    create_ball(
        world,
        Ball::new(IVec2::new(450, 300), IVec2::new(3, 3), 30, [200, 200, 200]),
    );

    h.session.start(0.0).unwrap();
    h.session.tick(0.0, &mut display);
    *h.pose.borrow_mut() = Some(gun_pose(centre_tip()));
    let outcome = h.session.tick(3.0, &mut display);

    assert_eq!(
        outcome,
        TickOutcome::Running {
            score: 1,
            time_left: 9,
            shot_fired: true,
            balls_hit: 1,
        }
    );
    assert_eq!(h.session.world().len(), 1, "hit ball is replaced, not removed");

    let scene = display.scenes.last().unwrap();
    assert_eq!(scene.hud[0].text, "Score: 1");
    assert_eq!(scene.hud[1].text, "Time: 9");
    assert!(display.previews.last().copied().unwrap() > 0);
}

#[test]
fn test_open_hand_moves_cursor_without_firing() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();

    let mut points = [Vec3::new(0.1, 0.1, 0.0); LANDMARK_COUNT];
    points[INDEX_TIP] = Vec3::new(0.0, 0.0, 0.0);
    *h.pose.borrow_mut() = Some(HandPose::new(points));

    h.session.start(0.0).unwrap();
    let outcome = h.session.tick(0.02, &mut display);

    assert!(matches!(outcome, TickOutcome::Running { shot_fired: false, score: 0, .. }));
    // 450 - 450 * 0.3, 300 - 300 * 0.3
    assert_eq!(h.session.cursor().pos, IVec2::new(315, 210));
}

#[test]
fn test_cursor_holds_when_hand_lost() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();
    *h.pose.borrow_mut() = Some(gun_pose(Vec3::new(0.0, 0.0, 0.0)));

    h.session.start(0.0).unwrap();
    h.session.tick(0.02, &mut display);
    let held = h.session.cursor().pos;

    *h.pose.borrow_mut() = None;
    h.session.tick(0.04, &mut display);
    h.session.tick(0.06, &mut display);
    assert_eq!(h.session.cursor().pos, held);
}

#[test]
fn test_restart_keeps_the_field_and_resets_score() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();

    let world = h.session.world_mut();
    world.clear();
    create_ball(
        world,
        Ball::new(IVec2::new(450, 300), IVec2::new(3, 3), 30, [90, 90, 90]),
    );
    *h.pose.borrow_mut() = Some(gun_pose(centre_tip()));

    h.session.start(0.0).unwrap();
    h.session.tick(0.02, &mut display);
    assert!(h.session.score() >= 1);

    *h.pose.borrow_mut() = None;
    assert!(matches!(h.session.tick(60.0, &mut display), TickOutcome::Finished { .. }));
    assert!(h.session.restart(60.0).is_ok());
    assert_eq!(h.session.score(), 0);
    assert_eq!(h.session.time_left(60.0), 10);
    assert_eq!(h.session.world().len(), 1);
}

#[test]
fn test_repeated_cycles_leave_no_open_capture() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();
    let mut now = 0.0;

    for round in 0..5 {
        if round % 2 == 0 {
            h.session.start(now).unwrap();
            h.session.tick(now + 0.02, &mut display);
            h.session.stop().unwrap();
        } else {
            h.session.start(now).unwrap();
            h.session.tick(now + 0.02, &mut display);
            h.session.tick(now + 11.0, &mut display);
            assert_eq!(h.open.get(), 0);
            h.session.restart(now + 11.0).unwrap();
            h.session.stop().unwrap();
        }
        assert_eq!(h.open.get(), 0);
        now += 20.0;
    }

    assert_eq!(h.session.state(), SessionState::NotStarted);
    assert!(!h.session.is_capturing());
}

#[test]
fn test_missing_frame_leaves_the_round_untouched() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();
    *h.pose.borrow_mut() = Some(gun_pose(Vec3::new(0.2, 0.2, 0.0)));

    h.session.start(0.0).unwrap();
    h.session.tick(0.02, &mut display);

    let cursor = h.session.cursor().pos;
    let score = h.session.score();
    let balls = ball_states(h.session.world());
    let detected = h.timestamps.borrow().len();
    let presented = display.scenes.len();

    h.script.borrow_mut().push_back(Ok(None));
    assert_eq!(h.session.tick(0.04, &mut display), TickOutcome::NoFrame);

    assert_eq!(h.session.cursor().pos, cursor);
    assert_eq!(h.session.score(), score);
    assert_eq!(ball_states(h.session.world()), balls);
    assert_eq!(h.timestamps.borrow().len(), detected, "no landmark call");
    assert_eq!(display.scenes.len(), presented, "nothing presented");
    assert_eq!(h.session.state(), SessionState::Running);
    assert_eq!(h.open.get(), 1);

    // Next frame picks up where the round left off
    assert!(matches!(h.session.tick(0.06, &mut display), TickOutcome::Running { .. }));
    assert_ne!(ball_states(h.session.world()), balls);
}

#[test]
fn test_camera_that_never_delivers_can_be_stopped() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();
    h.script
        .borrow_mut()
        .extend(std::iter::repeat_with(|| Ok(None)).take(100));

    h.session.start(0.0).unwrap();
    for now in [5.0, 10.0, 60.0] {
        assert_eq!(h.session.tick(now, &mut display), TickOutcome::NoFrame);
        assert_eq!(h.session.time_left(now), 10, "clock has not started");
    }

    h.session.stop().unwrap();
    assert_eq!(h.open.get(), 0);
    assert!(display.scenes.is_empty());
}

#[test]
fn test_refused_camera_ends_the_round() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();
    h.script.borrow_mut().extend([
        Ok(None),
        Ok(None),
        Err(CaptureError::Refused("permission denied".into())),
    ]);

    h.session.start(0.0).unwrap();
    let outcomes: Vec<_> = [5.0, 10.0, 60.0]
        .into_iter()
        .map(|now| h.session.tick(now, &mut display))
        .collect();

    assert_eq!(
        outcomes,
        [
            TickOutcome::NoFrame,
            TickOutcome::NoFrame,
            TickOutcome::CaptureLost { score: 0 },
        ]
    );
    assert_eq!(h.session.state(), SessionState::Over);
    assert_eq!(h.open.get(), 0);
    assert!(display.scenes.last().unwrap().game_over.is_some());

    // Camera works on the second try
    h.session.restart(61.0).unwrap();
    assert!(matches!(h.session.tick(61.02, &mut display), TickOutcome::Running { time_left: 10, .. }));
}

#[test]
fn test_landmark_timestamps_strictly_increase() {
    let mut h = harness();
    let mut display = RecordingDisplay::default();
    h.session.start(0.0).unwrap();

    // Same instant twice, then a clock that steps backwards
    for now in [1.0, 1.0, 1.0005, 0.9, 2.0] {
        h.session.tick(now, &mut display);
    }

    let stamps = h.timestamps.borrow();
    assert_eq!(stamps.len(), 5);
    assert!(stamps.windows(2).all(|w| w[0] < w[1]), "{stamps:?}");
}

#[test]
fn test_step_without_session() {
    let config = Config::default();
    let area = PlayArea::from(&config);
    let mut world = World::new();
    let mut rng = GameRng::new(7);
    let mut cursor = Cursor::new(area.center(), config.cursor_smoothing);
    let mut score = Score::new();
    let mut countdown = Countdown::new(0.0, config.round_secs);
    let mut events = Events::new();

    spawn_field(&mut world, &config, &mut rng);
    assert_eq!(world.len(), 5);

    step(
        &mut world,
        None,
        &area,
        &config,
        &mut cursor,
        &mut score,
        &mut countdown,
        &mut events,
        &mut rng,
    );

    assert!(!events.hand_seen);
    assert!(!events.shot_fired);
    assert_eq!(score.points, 0);
    assert_eq!(cursor.pos, IVec2::new(450, 300));
}
