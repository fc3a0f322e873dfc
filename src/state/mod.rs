//! Session state management
//!
//! Maps session ids to timers and serializes access to them.

pub mod app_state;
pub mod session;

// Re-export main types
pub use app_state::AppState;
pub use session::{SessionAction, SessionError, SessionView};
