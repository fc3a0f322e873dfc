//! Timer state machine and time arithmetic

use tracing::debug;

use super::{Countdown, TimerError, TimerSnapshot, TimerState, TimerStatus};

/// Single-use countdown timer driven by caller-supplied timestamps (ms).
///
/// The core assumes sequential access. Callers sharing one timer across
/// tasks must serialize access themselves.
#[derive(Debug, Clone, Default)]
pub struct TimerCore {
    state: TimerState,
}

impl TimerCore {
    /// Create an idle timer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn status(&self) -> TimerStatus {
        self.state.status()
    }

    /// Start a countdown of `duration_ms`, discarding any finished run.
    pub fn start(&mut self, duration_ms: i64, now_ms: i64) -> Result<(), TimerError> {
        if matches!(self.state, TimerState::Running(_) | TimerState::Paused { .. }) {
            return Err(TimerError::transition("start", self.status()));
        }
        if duration_ms <= 0 {
            return Err(TimerError::InvalidArgument(format!(
                "duration_ms must be positive, got {}",
                duration_ms
            )));
        }

        self.state = TimerState::Running(Countdown::new(now_ms, duration_ms));
        debug!("Timer started at {} for {}ms", now_ms, duration_ms);
        Ok(())
    }

    pub fn pause(&mut self, now_ms: i64) -> Result<(), TimerError> {
        let TimerState::Running(countdown) = self.state else {
            return Err(TimerError::transition("pause", self.status()));
        };

        self.state = TimerState::Paused {
            countdown,
            paused_since: now_ms,
        };
        debug!("Timer paused at {}", now_ms);
        Ok(())
    }

    /// Resume a paused timer. Fails if `now_ms` precedes the pause.
    pub fn resume(&mut self, now_ms: i64) -> Result<(), TimerError> {
        let TimerState::Paused {
            countdown,
            paused_since,
        } = self.state
        else {
            return Err(TimerError::transition("resume", self.status()));
        };

        let countdown = close_pause(countdown, paused_since, now_ms)?;
        self.state = TimerState::Running(countdown);
        debug!(
            "Timer resumed at {} ({}ms paused in total)",
            now_ms, countdown.paused_accum_ms
        );
        Ok(())
    }

    /// Stop the timer.
    ///
    /// A stop that arrives after the countdown already ran out is recorded as
    /// a completion at the nominal end instant, otherwise as a cancel at
    /// `now_ms`. Idle and finished timers are left alone.
    pub fn stop(&mut self, now_ms: i64) -> Result<(), TimerError> {
        let countdown = match self.state {
            TimerState::Running(countdown) => countdown,
            TimerState::Paused {
                countdown,
                paused_since,
            } => close_pause(countdown, paused_since, now_ms)?,
            _ => return Ok(()),
        };

        if remaining_of(&countdown, None, now_ms) <= 0 {
            self.state = TimerState::Completed {
                countdown,
                end_ts: countdown.nominal_end(),
            };
            debug!("Timer stopped after expiry, marked completed");
        } else {
            self.state = TimerState::Canceled {
                countdown,
                end_ts: now_ms,
            };
            debug!("Timer canceled at {}", now_ms);
        }
        Ok(())
    }

    /// Abandon the timer. Overrides any status except idle and completed.
    pub fn skip(&mut self, now_ms: i64) {
        let countdown = match self.state {
            TimerState::Idle | TimerState::Completed { .. } => return,
            TimerState::Running(countdown)
            | TimerState::Paused { countdown, .. }
            | TimerState::Canceled { countdown, .. }
            | TimerState::Skipped { countdown, .. } => countdown,
        };

        self.state = TimerState::Skipped {
            countdown,
            end_ts: now_ms,
        };
        debug!("Timer skipped at {}", now_ms);
    }

    /// Running time so far, excluding every pause
    pub fn elapsed(&self, now_ms: i64) -> i64 {
        match self.state.countdown() {
            Some(countdown) => elapsed_of(countdown, self.state.paused_since(), now_ms),
            None => 0,
        }
    }

    pub fn remaining(&self, now_ms: i64) -> i64 {
        match self.state.countdown() {
            Some(countdown) => remaining_of(countdown, self.state.paused_since(), now_ms),
            None => 0,
        }
    }

    /// Latch natural expiry. Returns whether the timer is completed.
    pub fn check_complete(&mut self, now_ms: i64) -> bool {
        let countdown = match self.state {
            TimerState::Completed { .. } => return true,
            TimerState::Running(countdown) | TimerState::Paused { countdown, .. } => countdown,
            _ => return false,
        };

        if self.remaining(now_ms) > 0 {
            return false;
        }

        self.state = TimerState::Completed {
            countdown,
            end_ts: countdown.nominal_end(),
        };
        debug!("Timer completed at {}", countdown.nominal_end());
        true
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from(&self.state)
    }
}

fn close_pause(mut countdown: Countdown, paused_since: i64, now_ms: i64) -> Result<Countdown, TimerError> {
    let interval = now_ms.saturating_sub(paused_since);
    if interval < 0 {
        return Err(TimerError::InvalidArgument(format!(
            "now_ms {} is earlier than paused_since {}",
            now_ms, paused_since
        )));
    }
    countdown.paused_accum_ms = countdown.paused_accum_ms.saturating_add(interval);
    Ok(countdown)
}

fn elapsed_of(countdown: &Countdown, paused_since: Option<i64>, now_ms: i64) -> i64 {
    let total = now_ms.saturating_sub(countdown.start_ts);
    let open_pause = paused_since.map_or(0, |since| now_ms.saturating_sub(since));
    let paused = countdown.paused_accum_ms.saturating_add(open_pause);
    total.saturating_sub(paused).max(0)
}

fn remaining_of(countdown: &Countdown, paused_since: Option<i64>, now_ms: i64) -> i64 {
    countdown
        .duration_ms
        .saturating_sub(elapsed_of(countdown, paused_since, now_ms))
        .max(0)
}
