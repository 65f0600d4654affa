use thiserror::Error;

use crate::fsm::{SessionAction, SessionState};

/// Errors surfaced by the game core
#[derive(Debug, Error)]
pub enum Error {
    #[error("capture: {0}")]
    Capture(#[from] CaptureError),

    #[error("hand pose: {0}")]
    Pose(#[from] PoseError),

    #[error("config: {0}")]
    Config(String),

    #[error("cannot {action:?} while {state:?}")]
    Transition {
        state: SessionState,
        action: SessionAction,
    },
}

/// Failure to open a capture device, or an open one going away
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("no capture device available")]
    Unavailable,

    #[error("capture device refused: {0}")]
    Refused(String),

    #[error("capture stream ended: {0}")]
    Lost(String),
}

/// Malformed landmark data handed in by a landmark source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoseError {
    #[error("expected {expected} floats, got {got}")]
    Length { expected: usize, got: usize },

    #[error("landmark {0} is not finite")]
    NonFinite(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
