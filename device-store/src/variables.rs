//! Mirrored variable store
//!
//! Device states can optionally be mirrored into host variables named
//! `prefix + CapitalizedStateName` (`MusicActiveService`, `SpotifyIsPlaying`,
//! ...). Variables are created on first use and hold string-encoded values
//! only.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::value::StateUpdate;

/// Thread-safe string variable store keyed by variable name
#[derive(Clone, Default)]
pub struct VariableStore {
    variables: Arc<RwLock<HashMap<String, String>>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the variable if absent, otherwise update its value
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut variables = self.variables.write().unwrap();
        variables.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.variables.read().unwrap().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.variables.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.read().unwrap().is_empty()
    }

    /// Mirror a published state list under `prefix + CapitalizedKey` names
    pub fn mirror(&self, prefix: &str, updates: &[StateUpdate]) {
        for update in updates {
            self.set(variable_name(prefix, &update.key), update.value.to_string());
        }
    }
}

/// `("Music", "activeService")` → `"MusicActiveService"`
pub fn variable_name(prefix: &str, state_key: &str) -> String {
    let mut chars = state_key.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", prefix, first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}
