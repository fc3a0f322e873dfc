//! Session sweeper background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Background task that drops sessions idle for longer than `retention`
pub async fn session_sweeper_task(state: Arc<AppState>, every: Duration, retention: Duration) {
    info!(
        "Starting session sweeper (every {:?}, retention {:?})",
        every, retention
    );

    let mut interval = interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match state.evict_stale(retention) {
            Ok(0) => debug!("Session sweep found nothing to evict"),
            Ok(evicted) => info!("Evicted {} idle sessions", evicted),
            Err(e) => warn!("Session sweep failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::SessionAction, timer::ManualClock};

    /// Let the sweeper run any tick that came due
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_idle_sessions() {
        let state = Arc::new(AppState::new(
            8000,
            "127.0.0.1".to_string(),
            Arc::new(ManualClock::new(0)),
        ));
        let running = state.create_session(60_000, Some(0)).unwrap().id;
        let stopped = state.create_session(60_000, Some(0)).unwrap().id;
        state.apply_action(&stopped, SessionAction::Stop, Some(10)).unwrap();

        let task = tokio::spawn(session_sweeper_task(
            Arc::clone(&state),
            Duration::from_secs(1),
            Duration::from_secs(60),
        ));

        tokio::time::advance(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(state.session_count().unwrap(), 2);

        // Touching a session restarts its retention window
        state.get_session(&running, Some(30_000)).unwrap();

        tokio::time::advance(Duration::from_millis(31_500)).await;
        settle().await;
        assert_eq!(state.session_count().unwrap(), 1);
        assert!(state.get_session(&running, Some(61_500)).is_ok());

        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert_eq!(state.session_count().unwrap(), 0);

        task.abort();
    }
}
