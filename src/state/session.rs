//! Session types shared by the store and the HTTP layer

use std::{fmt, str::FromStr};

use thiserror::Error;
use tokio::time::Instant;

use crate::timer::{TimerCore, TimerError, TimerSnapshot};

/// Action a client can apply to an existing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Pause,
    Resume,
    Stop,
    Skip,
}

impl SessionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionAction::Pause => "pause",
            SessionAction::Resume => "resume",
            SessionAction::Stop => "stop",
            SessionAction::Skip => "skip",
        }
    }

    /// Dispatch the action to the timer
    pub fn apply(self, timer: &mut TimerCore, now_ms: i64) -> Result<(), TimerError> {
        match self {
            SessionAction::Pause => timer.pause(now_ms),
            SessionAction::Resume => timer.resume(now_ms),
            SessionAction::Stop => timer.stop(now_ms),
            SessionAction::Skip => {
                timer.skip(now_ms);
                Ok(())
            }
        }
    }
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionAction {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pause" => Ok(SessionAction::Pause),
            "resume" => Ok(SessionAction::Resume),
            "stop" => Ok(SessionAction::Stop),
            "skip" => Ok(SessionAction::Skip),
            _ => Err(SessionError::UnknownAction(s.to_string())),
        }
    }
}

/// Errors surfaced by the session store
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("failed to lock session store: {0}")]
    LockPoisoned(String),
}

/// A timer owned by the store, plus when a client last touched it.
///
/// `tokio::time::Instant` so paused test runtimes control its age.
#[derive(Debug)]
pub(crate) struct SessionEntry {
    pub timer: TimerCore,
    pub touched_at: Instant,
}

impl SessionEntry {
    pub fn new(timer: TimerCore) -> Self {
        Self {
            timer,
            touched_at: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.touched_at = Instant::now();
    }
}

/// What the store hands back after every create, read or action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub id: String,
    pub snapshot: TimerSnapshot,
    pub remaining_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!("pause".parse::<SessionAction>().unwrap(), SessionAction::Pause);
        assert_eq!("RESUME".parse::<SessionAction>().unwrap(), SessionAction::Resume);
        assert_eq!(" Stop ".parse::<SessionAction>().unwrap(), SessionAction::Stop);
        assert_eq!("skip".parse::<SessionAction>().unwrap(), SessionAction::Skip);
        assert!(matches!(
            "rewind".parse::<SessionAction>(),
            Err(SessionError::UnknownAction(action)) if action == "rewind"
        ));
    }
}
