//! Session State Machine
//!
//! NotStarted → Running → Over, with restart from Over and an explicit stop
//! back to NotStarted.

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    NotStarted,
    Running,
    Over,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionAction {
    Start,
    Expire,
    Stop,
    Restart,
}

impl SessionAction {
    /// Parse an action name sent by the host page
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "START" => Some(SessionAction::Start),
            "EXPIRE" => Some(SessionAction::Expire),
            "STOP" => Some(SessionAction::Stop),
            "RESTART" => Some(SessionAction::Restart),
            _ => None,
        }
    }
}

/// Result of a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: SessionState,
    pub to_state: SessionState,
    pub action: SessionAction,
}

/// Session finite state machine
#[derive(Debug, Clone)]
pub struct SessionFsm {
    state: SessionState,
}

impl SessionFsm {
    pub fn new() -> Self {
        Self {
            state: SessionState::NotStarted,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get current state as string (for JS interop)
    pub fn state_string(&self) -> String {
        format!("{:?}", self.state)
    }

    pub fn can_transition(&self, action: SessionAction) -> bool {
        self.get_next_state(action).is_some()
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: SessionAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    fn get_next_state(&self, action: SessionAction) -> Option<SessionState> {
        match (self.state, action) {
            (SessionState::NotStarted, SessionAction::Start) => Some(SessionState::Running),

            (SessionState::Running, SessionAction::Expire) => Some(SessionState::Over),
            (SessionState::Running, SessionAction::Stop) => Some(SessionState::NotStarted),

            (SessionState::Over, SessionAction::Restart) => Some(SessionState::Running),
            (SessionState::Over, SessionAction::Stop) => Some(SessionState::NotStarted),

            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::Over
    }
}

impl Default for SessionFsm {
    fn default() -> Self {
        Self::new()
    }
}
