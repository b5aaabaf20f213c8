//! Error types for the script client

use thiserror::Error;

/// Errors that can occur while running a script against a player application
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The `osascript` interpreter could not be spawned
    #[error("failed to launch osascript: {0}")]
    Launch(String),

    /// The script did not complete within the configured timeout
    #[error("script timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The script ran but the interpreter reported an error
    #[error("script failed: {0}")]
    Script(String),

    /// The reply could not be parsed as an AppleScript record
    #[error("record parse error: {0}")]
    Parse(String),
}
