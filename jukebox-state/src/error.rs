//! Error types for jukebox-state

use std::fmt;

/// Result type for jukebox-state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors that can occur during device state management
///
/// Poll ticks and action handlers never return these; they log and
/// continue. The fallible surface is lifecycle only (stopping the
/// scheduler).
#[derive(Debug)]
pub enum StateError {
    /// Poll scheduler shutdown failed
    ShutdownFailed,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::ShutdownFailed => write!(f, "Poll scheduler shutdown failed"),
        }
    }
}

impl std::error::Error for StateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            StateError::ShutdownFailed.to_string(),
            "Poll scheduler shutdown failed"
        );
    }
}
