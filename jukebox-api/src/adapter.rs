//! Player adapters
//!
//! One adapter per player, all sharing the same dispatch pipeline: build the
//! script(s) for a command, run them, wait out the settle delay. Per-player
//! differences live in [`crate::profile::PlayerProfile`] and the script
//! builders, not here.

use std::time::Duration;

use script_client::{Record, ScriptRunner};
use tracing::{debug, warn};

use crate::command::Command;
use crate::error::{ApiError, Result};
use crate::kind::PlayerKind;
use crate::scripts;

/// Result of one status refresh
///
/// `Unavailable` covers everything from "application not running" to a
/// timed-out or unparseable query; the caller publishes the stopped status
/// and tries again on the next poll tick. Refresh never errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability {
    Available(Record),
    Unavailable,
}

impl Availability {
    pub fn record(&self) -> Option<&Record> {
        match self {
            Availability::Available(record) => Some(record),
            Availability::Unavailable => None,
        }
    }
}

/// Last observed transport state, supplied by the caller at execute time
///
/// Relative commands (volume up, skip forward) and toggles resolve against
/// this rather than issuing an extra query first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecCtx {
    /// Volume on the API 0-100 scale
    pub volume: i64,
    /// Position in seconds
    pub position: i64,
    pub shuffling: bool,
    pub repeat: crate::command::RepeatMode,
    pub muted: bool,
    pub fullscreen: bool,
}

impl Default for ExecCtx {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            position: 0,
            shuffling: false,
            repeat: crate::command::RepeatMode::Off,
            muted: false,
            fullscreen: false,
        }
    }
}

/// Fallback volume when no better value is known (unmute with no pre-mute
/// memory, missing volume field in a reply)
pub const DEFAULT_VOLUME: i64 = 50;

/// Drives one player application through the scripting bridge
pub struct PlayerAdapter {
    kind: PlayerKind,
    runner: Box<dyn ScriptRunner>,
    /// Volume before the last `Mute`, restored by `Unmute`
    pre_mute_volume: Option<i64>,
    /// Injected sleep so tests don't pay real settle delays
    sleeper: fn(Duration),
}

impl PlayerAdapter {
    pub fn new(kind: PlayerKind, runner: Box<dyn ScriptRunner>) -> Self {
        Self {
            kind,
            runner,
            pre_mute_volume: None,
            sleeper: std::thread::sleep,
        }
    }

    #[cfg(test)]
    fn without_sleep(kind: PlayerKind, runner: Box<dyn ScriptRunner>) -> Self {
        Self {
            kind,
            runner,
            pre_mute_volume: None,
            sleeper: |_| {},
        }
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Query the player's current status
    ///
    /// Fails soft: any transport or parse problem logs and returns
    /// `Unavailable` rather than erroring.
    pub fn refresh(&self) -> Availability {
        match self.query_status() {
            Ok(record) => Availability::Available(record),
            Err(err) => {
                debug!(player = %self.kind, error = %err, "status refresh failed");
                Availability::Unavailable
            }
        }
    }

    fn query_status(&self) -> Result<Record> {
        let reply = self.runner.run(&scripts::status_script(self.kind))?;
        let record = script_client::record::parse(&reply)?;
        if let Some(message) = record.get("error").and_then(|v| v.as_str()) {
            return Err(ApiError::Player(message.to_string()));
        }
        Ok(record)
    }

    /// Execute one command, then wait out its settle delay
    ///
    /// Unsupported commands are a silent no-op. Failures are logged and
    /// swallowed - an action handler must never abort on a flaky player.
    /// The caller is expected to refresh immediately afterwards so the new
    /// transport state is observed without waiting for the next poll tick.
    pub fn execute(&mut self, command: &Command, ctx: &ExecCtx) {
        let scripts = self.resolve_scripts(command, ctx);
        if scripts.is_empty() {
            debug!(player = %self.kind, ?command, "command not supported, ignoring");
            return;
        }

        for script in &scripts {
            if let Err(err) = self.runner.run(script) {
                warn!(player = %self.kind, ?command, error = %err, "command failed");
                return;
            }
        }

        let settle = command.settle_delay(self.kind);
        if !settle.is_zero() {
            (self.sleeper)(settle);
        }
    }

    /// Expand mute/unmute around the shared script builder
    fn resolve_scripts(&mut self, command: &Command, ctx: &ExecCtx) -> Vec<String> {
        match command {
            Command::Mute => {
                self.pre_mute_volume = Some(ctx.volume);
                scripts::command_scripts(self.kind, command, ctx)
            }
            Command::Unmute => {
                let restore = self.pre_mute_volume.take().unwrap_or(DEFAULT_VOLUME);
                vec![scripts::set_volume(
                    crate::profile::PlayerProfile::of(self.kind),
                    restore,
                )]
            }
            _ => scripts::command_scripts(self.kind, command, ctx),
        }
    }
}

/// Command/refresh seam between the arbitration engine and a player device
///
/// The engine never touches a peer's state directly; all cross-player
/// effects (pausing a peer on takeover, broadcast stop) go through this
/// trait.
pub trait PlayerController: Send + Sync {
    fn kind(&self) -> PlayerKind;

    /// Refresh the player's status and publish it to its device
    fn refresh(&self);

    /// Execute a command, then refresh
    fn execute(&self, command: &Command);
}
