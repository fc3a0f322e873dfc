//! Time providers
//!
//! The timer core never reads the time itself. The session service asks a
//! [`Clock`] when a request leaves `now_ms` out, and tests drive a
//! [`ManualClock`] instead of waiting for real time to pass.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Source of epoch milliseconds
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    /// Move forward by `ms`. Time never runs backward on this clock.
    pub fn advance(&self, ms: u64) {
        let delta = i64::try_from(ms).unwrap_or(i64::MAX);
        let mut current = self.now_ms.load(Ordering::SeqCst);
        loop {
            match self.now_ms.compare_exchange_weak(
                current,
                current.saturating_add(delta),
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
