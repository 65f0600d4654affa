//! Game session: owns round state and the capture handle, and runs one tick
//! at a time for an external scheduler.

use hecs::World;
use log::{info, warn};

use crate::error::{CaptureError, Error, Result};
use crate::fsm::{SessionAction, SessionFsm, SessionState};
use crate::hand::HandPose;
use crate::scene::{annotate_preview, Scene, Shape};
use crate::{
    spawn_field, step, Config, Countdown, Cursor, Events, GameRng, PlayArea, Score, Time,
};

/// An open camera; dropping it releases the device
pub trait FrameStream {
    type Frame;

    /// Next frame, `Ok(None)` if the device has nothing to give this time,
    /// or an error once the stream is gone for good
    fn read(&mut self) -> std::result::Result<Option<Self::Frame>, CaptureError>;
}

/// Something that can open a camera
pub trait Capture {
    type Stream: FrameStream;

    fn open(&mut self) -> std::result::Result<Self::Stream, CaptureError>;
}

/// Hand landmark detector running in streaming mode
pub trait LandmarkSource<F> {
    /// `timestamp_ms` strictly increases between calls
    fn detect(&mut self, frame: &F, timestamp_ms: u64) -> Option<HandPose>;
}

/// Output surface for the game view and the camera preview
pub trait Display<F> {
    /// `frame` is `None` when the camera went away before this scene
    fn present(&mut self, scene: &Scene, frame: Option<&F>, preview: &[Shape]);
}

pub type FrameOf<C> = <<C as Capture>::Stream as FrameStream>::Frame;

/// What a call to [`GameSession::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session is not running; nothing happened
    Idle,
    /// Capture gave no frame; the tick was skipped
    NoFrame,
    Running {
        score: u32,
        time_left: u32,
        shot_fired: bool,
        balls_hit: u32,
    },
    /// Timer ran out on this tick; the session is now over
    Finished { score: u32 },
    /// Camera failed mid-round; the session is over and the camera released
    CaptureLost { score: u32 },
}

pub struct GameSession<C: Capture, L> {
    config: Config,
    area: PlayArea,
    fsm: SessionFsm,
    world: World,
    cursor: Cursor,
    score: Score,
    countdown: Countdown,
    events: Events,
    rng: GameRng,
    capture: C,
    stream: Option<C::Stream>,
    landmarks: L,
    last_timestamp_ms: Option<u64>,
    /// Set by the first delivered frame of a round
    clock_started: bool,
}

impl<C, L> GameSession<C, L>
where
    C: Capture,
    L: LandmarkSource<FrameOf<C>>,
{
    pub fn new(config: Config, capture: C, landmarks: L) -> Result<Self> {
        config.validate()?;

        let area = PlayArea::from(&config);
        let mut rng = GameRng::from_seed(config.seed);
        let mut world = World::new();
        spawn_field(&mut world, &config, &mut rng);

        Ok(Self {
            cursor: Cursor::new(area.center(), config.cursor_smoothing),
            countdown: Countdown::new(0.0, config.round_secs),
            area,
            fsm: SessionFsm::new(),
            world,
            score: Score::new(),
            events: Events::new(),
            rng,
            capture,
            stream: None,
            landmarks,
            last_timestamp_ms: None,
            clock_started: false,
            config,
        })
    }

    /// NotStarted → Running
    pub fn start(&mut self, now: f64) -> Result<()> {
        self.begin_round(SessionAction::Start, now)
    }

    /// Over → Running
    pub fn restart(&mut self, now: f64) -> Result<()> {
        self.begin_round(SessionAction::Restart, now)
    }

    /// Running or Over → NotStarted, releasing the camera
    pub fn stop(&mut self) -> Result<()> {
        self.apply(SessionAction::Stop)?;
        self.stream = None;
        info!("session stopped with score {}", self.score.points);
        Ok(())
    }

    fn begin_round(&mut self, action: SessionAction, now: f64) -> Result<()> {
        self.check(action)?;

        // Open first so a refused camera leaves the session where it was
        let stream = self.capture.open()?;
        self.apply(action)?;

        self.stream = Some(stream);
        self.score.reset();
        self.countdown.restart(now, self.config.round_secs);
        self.clock_started = false;
        info!(
            "round started ({:?}), {}s on the clock",
            action, self.config.round_secs
        );
        Ok(())
    }

    /// Advance one tick.
    ///
    /// Order: read a frame, check the timer, detect the hand, update cursor
    /// and gesture, move and hit-test balls, then present. The round clock
    /// starts on the first frame, so a slow camera does not eat into it.
    pub fn tick<D>(&mut self, now: f64, display: &mut D) -> TickOutcome
    where
        D: Display<FrameOf<C>>,
    {
        if !self.fsm.is_running() {
            return TickOutcome::Idle;
        }
        let Some(stream) = self.stream.as_mut() else {
            return TickOutcome::Idle;
        };
        let frame = match stream.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => return TickOutcome::NoFrame,
            Err(e) => return self.abandon(e, display),
        };

        if !self.clock_started {
            self.countdown.restart(now, self.config.round_secs);
            self.clock_started = true;
        } else if self.countdown.is_expired(now) {
            return self.finish(&frame, display);
        }

        let time = Time::new(now);
        let timestamp_ms = self.next_timestamp(&time);
        let pose = self.landmarks.detect(&frame, timestamp_ms);

        step(
            &mut self.world,
            pose.as_ref(),
            &self.area,
            &self.config,
            &mut self.cursor,
            &mut self.score,
            &mut self.countdown,
            &mut self.events,
            &mut self.rng,
        );

        let time_left = self.countdown.time_left(now);
        let scene = Scene::playing(
            &self.world,
            self.area,
            self.cursor.pos,
            self.events.shot_fired,
            self.score.points,
            time_left,
        );
        let preview = pose
            .map(|pose| annotate_preview(&pose, &self.area))
            .unwrap_or_default();
        display.present(&scene, Some(&frame), &preview);

        TickOutcome::Running {
            score: self.score.points,
            time_left,
            shot_fired: self.events.shot_fired,
            balls_hit: self.events.balls_hit,
        }
    }

    fn finish<D>(&mut self, frame: &FrameOf<C>, display: &mut D) -> TickOutcome
    where
        D: Display<FrameOf<C>>,
    {
        let score = self.end_round();
        display.present(&Scene::finished(self.area, score), Some(frame), &[]);
        info!("game over, final score {score}");
        TickOutcome::Finished { score }
    }

    fn abandon<D>(&mut self, error: CaptureError, display: &mut D) -> TickOutcome
    where
        D: Display<FrameOf<C>>,
    {
        let score = self.end_round();
        display.present(&Scene::finished(self.area, score), None, &[]);
        warn!("round ended early, {error}");
        TickOutcome::CaptureLost { score }
    }

    /// Running → Over, releasing the camera
    fn end_round(&mut self) -> u32 {
        if let Err(e) = self.apply(SessionAction::Expire) {
            warn!("{e}");
        }
        self.stream = None;
        self.score.points
    }

    fn next_timestamp(&mut self, time: &Time) -> u64 {
        let ms = match self.last_timestamp_ms {
            Some(last) if time.as_millis() <= last => last + 1,
            _ => time.as_millis(),
        };
        self.last_timestamp_ms = Some(ms);
        ms
    }

    fn check(&self, action: SessionAction) -> Result<()> {
        if self.fsm.can_transition(action) {
            Ok(())
        } else {
            let err = Error::Transition {
                state: self.fsm.state(),
                action,
            };
            warn!("{err}");
            Err(err)
        }
    }

    fn apply(&mut self, action: SessionAction) -> Result<()> {
        self.check(action)?;
        self.fsm.transition(action);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.fsm.state()
    }

    pub fn score(&self) -> u32 {
        self.score.points
    }

    pub fn time_left(&self, now: f64) -> u32 {
        match self.fsm.state() {
            SessionState::Running if self.clock_started => self.countdown.time_left(now),
            SessionState::Running => self.config.round_secs,
            SessionState::NotStarted => self.config.round_secs,
            SessionState::Over => 0,
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True while the session holds an open camera
    pub fn is_capturing(&self) -> bool {
        self.stream.is_some()
    }
}
