//! Timer error types

use thiserror::Error;

use super::TimerStatus;

/// Errors raised by [`TimerCore`](super::TimerCore) operations.
///
/// A failed operation never mutates the timer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The operation is not allowed in the current status
    #[error("cannot {operation} while {status}")]
    InvalidTransition {
        operation: &'static str,
        status: TimerStatus,
    },

    /// A supplied value violates a precondition
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl TimerError {
    pub(crate) fn transition(operation: &'static str, status: TimerStatus) -> Self {
        Self::InvalidTransition { operation, status }
    }
}
