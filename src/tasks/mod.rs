//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod session_sweeper;

// Re-export main functions
pub use session_sweeper::session_sweeper_task;
