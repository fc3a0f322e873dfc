//! Timer state structure
//!
//! The lifecycle phase and the fields that are meaningful in it travel
//! together, so a paused timer always has a `paused_since` and a finished
//! timer always has an `end_ts`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
    Canceled,
    Skipped,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
            TimerStatus::Canceled => "canceled",
            TimerStatus::Skipped => "skipped",
        }
    }

    /// Completed, canceled and skipped timers are finished
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TimerStatus::Completed | TimerStatus::Canceled | TimerStatus::Skipped
        )
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of a timer that exists from `start` onward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    /// When the timer was started (ms)
    pub start_ts: i64,
    /// Planned duration, always positive
    pub duration_ms: i64,
    /// Time spent paused in closed pause intervals
    pub paused_accum_ms: i64,
}

impl Countdown {
    pub fn new(start_ts: i64, duration_ms: i64) -> Self {
        Self {
            start_ts,
            duration_ms,
            paused_accum_ms: 0,
        }
    }

    /// Instant the countdown reaches zero if it was never paused
    pub fn nominal_end(&self) -> i64 {
        self.start_ts.saturating_add(self.duration_ms)
    }
}

/// Timer state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running(Countdown),
    Paused {
        countdown: Countdown,
        paused_since: i64,
    },
    Completed {
        countdown: Countdown,
        end_ts: i64,
    },
    Canceled {
        countdown: Countdown,
        end_ts: i64,
    },
    Skipped {
        countdown: Countdown,
        end_ts: i64,
    },
}

impl TimerState {
    pub fn status(&self) -> TimerStatus {
        match self {
            TimerState::Idle => TimerStatus::Idle,
            TimerState::Running(_) => TimerStatus::Running,
            TimerState::Paused { .. } => TimerStatus::Paused,
            TimerState::Completed { .. } => TimerStatus::Completed,
            TimerState::Canceled { .. } => TimerStatus::Canceled,
            TimerState::Skipped { .. } => TimerStatus::Skipped,
        }
    }

    /// The countdown, or `None` while idle
    pub fn countdown(&self) -> Option<&Countdown> {
        match self {
            TimerState::Idle => None,
            TimerState::Running(countdown)
            | TimerState::Paused { countdown, .. }
            | TimerState::Completed { countdown, .. }
            | TimerState::Canceled { countdown, .. }
            | TimerState::Skipped { countdown, .. } => Some(countdown),
        }
    }

    pub fn paused_since(&self) -> Option<i64> {
        match self {
            TimerState::Paused { paused_since, .. } => Some(*paused_since),
            _ => None,
        }
    }

    pub fn end_ts(&self) -> Option<i64> {
        match self {
            TimerState::Completed { end_ts, .. }
            | TimerState::Canceled { end_ts, .. }
            | TimerState::Skipped { end_ts, .. } => Some(*end_ts),
            _ => None,
        }
    }
}

/// Flat, serializable view of a timer for external consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub start_ts: Option<i64>,
    pub duration_ms: i64,
    pub paused_since: Option<i64>,
    pub paused_accum_ms: i64,
    pub end_ts: Option<i64>,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        let countdown = state.countdown();
        Self {
            status: state.status(),
            start_ts: countdown.map(|c| c.start_ts),
            duration_ms: countdown.map_or(0, |c| c.duration_ms),
            paused_since: state.paused_since(),
            paused_accum_ms: countdown.map_or(0, |c| c.paused_accum_ms),
            end_ts: state.end_ts(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_snapshot() {
        let snapshot = TimerSnapshot::from(&TimerState::Idle);
        assert_eq!(snapshot.status, TimerStatus::Idle);
        assert_eq!(snapshot.start_ts, None);
        assert_eq!(snapshot.duration_ms, 0);
        assert_eq!(snapshot.paused_since, None);
        assert_eq!(snapshot.paused_accum_ms, 0);
        assert_eq!(snapshot.end_ts, None);
    }

    #[test]
    fn test_paused_snapshot() {
        let state = TimerState::Paused {
            countdown: Countdown {
                start_ts: 100,
                duration_ms: 5_000,
                paused_accum_ms: 250,
            },
            paused_since: 1_100,
        };
        let snapshot = TimerSnapshot::from(&state);
        assert_eq!(snapshot.status, TimerStatus::Paused);
        assert_eq!(snapshot.start_ts, Some(100));
        assert_eq!(snapshot.paused_since, Some(1_100));
        assert_eq!(snapshot.paused_accum_ms, 250);
        assert_eq!(snapshot.end_ts, None);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&TimerStatus::Canceled).unwrap();
        assert_eq!(json, "\"canceled\"");
        assert!(TimerStatus::Skipped.is_terminal());
        assert!(!TimerStatus::Paused.is_terminal());
    }
}
