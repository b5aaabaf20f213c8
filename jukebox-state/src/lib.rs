//! Virtual-device layer for the jukebox bridge
//!
//! Presents the three desktop players (Spotify, Apple Music, VLC) as
//! host-side virtual devices plus one manager device that arbitrates which
//! player is active when more than one can play at once.
//!
//! # Architecture
//!
//! ```text
//! PollScheduler ──▶ PlayerDevice.refresh()  (×3)
//!                      │  adapter query → decode → publish states
//!               ──▶ ManagerDevice.tick()
//!                      │  read player states → arbitrate → pause peers
//!                      │  → publish active status
//! ```
//!
//! The arbitration decision itself is a pure function
//! ([`manager::arbitrate`]); everything around it is plumbing that reads
//! from and writes to the shared [`device_store::DeviceRegistry`].

pub mod config;
pub mod decode;
pub mod error;
pub mod logging;
pub mod manager;
pub mod model;
pub mod player_device;
pub mod poller;
pub mod publish;

pub use config::{ManagerConfig, PlayerDeviceConfig, PreferredFallback};
pub use error::{Result, StateError};
pub use manager::{arbitrate, ArbitrationInput, ArbitrationMemory, ManagerDevice, Outcome};
pub use model::{PlayerStatus, TrackInfo, TransportState};
pub use player_device::PlayerDevice;
pub use poller::{Monitored, PollScheduler};
