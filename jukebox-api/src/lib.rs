//! Typed command/status API for scriptable desktop media players
//!
//! This crate sits between the virtual-device layer and the raw scripting
//! bridge. It defines the shared command vocabulary ([`Command`]), the
//! per-player quirk table ([`PlayerProfile`]), the script builders, and the
//! [`PlayerAdapter`] that runs them with settle delays and fail-soft error
//! handling.
//!
//! # Layering
//!
//! ```text
//! virtual devices ── Command ──▶ PlayerAdapter ── script ──▶ ScriptRunner
//!                 ◀─ Availability (raw Record) ──┘
//! ```
//!
//! Status replies come back as untyped [`script_client::Record`]s; turning
//! them into a normalized status is the next layer's job.

pub mod action;
pub mod adapter;
pub mod command;
pub mod error;
pub mod kind;
pub mod profile;
pub mod scripts;

pub use action::{command_from_action, ActionParams};
pub use adapter::{Availability, ExecCtx, PlayerAdapter, PlayerController, DEFAULT_VOLUME};
pub use command::{clamp_rating, clamp_volume, Command, PlaybackRate, RepeatArg, RepeatMode, ToggleArg};
pub use error::ApiError;
pub use kind::{PlayerKind, PRIORITY};
pub use profile::PlayerProfile;
