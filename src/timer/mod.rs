//! Countdown timer engine
//!
//! A deterministic state machine that tracks elapsed and remaining time across
//! start, pause, resume, stop, skip and completion. Every time-dependent
//! operation takes the current instant as an argument; nothing in here reads a
//! clock.

pub mod clock;
pub mod error;
pub mod state;
pub mod timer_core;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TimerError;
pub use state::{Countdown, TimerSnapshot, TimerState, TimerStatus};
pub use timer_core::TimerCore;
