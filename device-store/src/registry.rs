//! Device registry with atomic state publishing
//!
//! The registry replaces the ambient per-plugin device dictionaries the host
//! would otherwise hand out: one explicit map from device id to record,
//! shared via interior mutability so the poll loop, the arbitration engine,
//! and action handlers all see the same state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::device::{DeviceId, DeviceRecord};
use crate::value::StateUpdate;

/// Thread-safe registry of device records, keyed by id
///
/// Cloning is cheap and shares the underlying storage.
#[derive(Clone, Default)]
pub struct DeviceRegistry {
    devices: Arc<RwLock<HashMap<DeviceId, DeviceRecord>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a device record
    pub fn insert(&self, device: DeviceRecord) {
        let mut devices = self.devices.write().unwrap();
        devices.insert(device.id, device);
    }

    /// Remove a device; removing an absent id is a no-op
    pub fn remove(&self, id: DeviceId) {
        let mut devices = self.devices.write().unwrap();
        devices.remove(&id);
    }

    /// Look up a device by id
    pub fn get(&self, id: DeviceId) -> Option<DeviceRecord> {
        self.devices.read().unwrap().get(&id).cloned()
    }

    /// All devices owned by the given plugin tag
    pub fn by_owner(&self, owner: &str) -> Vec<DeviceRecord> {
        let mut found: Vec<DeviceRecord> = self
            .devices
            .read()
            .unwrap()
            .values()
            .filter(|d| d.owner == owner)
            .cloned()
            .collect();
        found.sort_by_key(|d| d.id);
        found
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        self.devices.read().unwrap().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.devices.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.read().unwrap().is_empty()
    }

    /// Atomically replace the named state values on one device
    ///
    /// All updates land under a single write lock, so a reader never sees a
    /// half-applied snapshot. Returns false when the device is unknown.
    pub fn update_states(&self, id: DeviceId, updates: &[StateUpdate]) -> bool {
        let mut devices = self.devices.write().unwrap();
        match devices.get_mut(&id) {
            Some(device) => {
                for update in updates {
                    device
                        .states
                        .insert(update.key.clone(), update.value.clone());
                }
                true
            }
            None => false,
        }
    }
}
