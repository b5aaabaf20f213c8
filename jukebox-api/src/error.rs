//! Error types for the player API

use script_client::ScriptError;
use thiserror::Error;

/// Errors from talking to a player application
///
/// These stay inside the adapter: `refresh` converts them into
/// [`crate::adapter::Availability::Unavailable`] and `execute` logs them,
/// so callers never see a fault from a missing or hung player.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The scripting call itself failed (launch, timeout, script error)
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// The reply parsed but the player reported an internal error
    #[error("player error: {0}")]
    Player(String),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
