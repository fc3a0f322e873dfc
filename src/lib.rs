//! Pomodoro Timer - A deterministic countdown timer with an HTTP session service
//!
//! The [`timer`] module holds the state machine; it never reads a clock and
//! takes every instant as an argument. The remaining modules wrap it in a
//! session store and an axum router.

pub mod api;
pub mod config;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use timer::{TimerCore, TimerError, TimerSnapshot, TimerStatus};
pub use utils::signals::shutdown_signal;
