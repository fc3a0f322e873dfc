//! Presentation helpers for timer clients

use serde::{Deserialize, Serialize};

use crate::timer::TimerStatus;

/// Format remaining milliseconds as "MM:SS", rounding partial seconds up
/// so the display reads 00:00 only once the countdown is over.
pub fn format_remaining(ms: i64) -> String {
    let total_secs = ms.max(0).saturating_add(999) / 1000;
    let m = total_secs / 60;
    let s = total_secs % 60;
    format!("{:02}:{:02}", m, s)
}

/// Which timer controls a client should offer for a given status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start: bool,
    pub pause: bool,
    pub resume: bool,
    pub stop: bool,
}

impl Controls {
    pub fn for_status(status: TimerStatus) -> Self {
        Self {
            start: !matches!(status, TimerStatus::Running | TimerStatus::Paused),
            pause: status == TimerStatus::Running,
            resume: status == TimerStatus::Paused,
            stop: !matches!(
                status,
                TimerStatus::Idle | TimerStatus::Completed | TimerStatus::Canceled
            ),
        }
    }
}
