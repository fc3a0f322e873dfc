//! Utility functions module
//!
//! Shutdown handling and helpers for presenting timer state to users.

pub mod display;
pub mod signals;

// Re-export main functions
pub use display::{format_remaining, Controls};
pub use signals::shutdown_signal;
