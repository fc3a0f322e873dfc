//! Main application state management

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use tracing::{debug, info};
use uuid::Uuid;

use super::session::{SessionAction, SessionEntry, SessionError, SessionView};
use crate::timer::{Clock, TimerCore};

/// Main application state that owns every timer session
pub struct AppState {
    /// Session id -> timer. The mutex is the per-session serialization point.
    sessions: Mutex<HashMap<String, SessionEntry>>,
    /// Fallback time source for requests that omit `now_ms`
    clock: Arc<dyn Clock>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    /// Create an empty session store
    pub fn new(port: u16, host: String, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            clock,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    fn lock_sessions(&self) -> Result<MutexGuard<'_, HashMap<String, SessionEntry>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|e| SessionError::LockPoisoned(e.to_string()))
    }

    fn resolve_now(&self, now_ms: Option<i64>) -> i64 {
        now_ms.unwrap_or_else(|| self.clock.now_ms())
    }

    /// Start a new timer session
    pub fn create_session(&self, duration_ms: i64, now_ms: Option<i64>) -> Result<SessionView, SessionError> {
        let now = self.resolve_now(now_ms);
        let mut timer = TimerCore::new();
        timer.start(duration_ms, now)?;

        let id = Uuid::new_v4().to_string();
        let view = read_session(&id, &mut timer, now);

        self.lock_sessions()?.insert(id.clone(), SessionEntry::new(timer));
        info!("Created session {} ({}ms)", id, duration_ms);
        Ok(view)
    }

    /// Read a session, latching completion if the countdown ran out
    pub fn get_session(&self, id: &str, now_ms: Option<i64>) -> Result<SessionView, SessionError> {
        let now = self.resolve_now(now_ms);
        let mut sessions = self.lock_sessions()?;
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        entry.touch();
        Ok(read_session(id, &mut entry.timer, now))
    }

    /// Apply a client action to a session
    pub fn apply_action(
        &self,
        id: &str,
        action: SessionAction,
        now_ms: Option<i64>,
    ) -> Result<SessionView, SessionError> {
        let now = self.resolve_now(now_ms);
        let mut sessions = self.lock_sessions()?;
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;

        action.apply(&mut entry.timer, now)?;
        entry.touch();
        info!("Session {}: {} -> {}", id, action, entry.timer.status());
        Ok(read_session(id, &mut entry.timer, now))
    }

    /// Number of sessions currently held
    pub fn session_count(&self) -> Result<usize, SessionError> {
        Ok(self.lock_sessions()?.len())
    }

    /// Drop sessions nobody has touched for `retention`, whatever their status
    pub fn evict_stale(&self, retention: Duration) -> Result<usize, SessionError> {
        let mut sessions = self.lock_sessions()?;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.touched_at.elapsed() < retention);
        Ok(before - sessions.len())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// Remaining time is taken before completion is latched
fn read_session(id: &str, timer: &mut TimerCore, now_ms: i64) -> SessionView {
    let remaining_ms = timer.remaining(now_ms);
    if timer.check_complete(now_ms) {
        debug!("Session {} is completed", id);
    }

    SessionView {
        id: id.to_string(),
        snapshot: timer.snapshot(),
        remaining_ms,
    }
}
