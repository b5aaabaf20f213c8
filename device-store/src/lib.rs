//! Generic host-side device storage
//!
//! The automation host owns a registry of virtual devices, each with a
//! configuration props map and a published states map, plus an optional
//! variable store that mirrors states as strings. This crate models that
//! collaborator surface so the rest of the workspace can be driven against
//! an in-process implementation.
//!
//! # Quick Start
//!
//! ```rust
//! use device_store::{DeviceId, DeviceRecord, DeviceRegistry, StateUpdate};
//!
//! let registry = DeviceRegistry::new();
//! registry.insert(DeviceRecord::new(DeviceId::new(1), "Office Spotify", "spotify"));
//!
//! // Atomically replace named states
//! registry.update_states(DeviceId::new(1), &[
//!     StateUpdate::new("isPlaying", true),
//!     StateUpdate::new("soundVolume", 65i64),
//! ]);
//!
//! let dev = registry.get(DeviceId::new(1)).unwrap();
//! assert!(dev.state_bool("isPlaying", false));
//! ```

pub mod device;
pub mod registry;
pub mod value;
pub mod variables;

pub use device::{DeviceId, DeviceRecord, Props};
pub use registry::DeviceRegistry;
pub use value::{StateUpdate, StateValue};
pub use variables::{variable_name, VariableStore};
