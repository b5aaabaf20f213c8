//! Device records and typed property access

use std::collections::HashMap;

use crate::value::StateValue;

/// Opaque numeric device identifier assigned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u64);

impl DeviceId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One virtual device as the host sees it
///
/// `props` is the host-side configuration (key → string), `states` the
/// published state values. Both maps are loosely typed on purpose - the
/// typed views live in [`Props`] and the consumer crates.
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub name: String,
    /// Tag of the owning plugin/adapter, used for by-owner lookups
    pub owner: String,
    pub props: HashMap<String, String>,
    pub states: HashMap<String, StateValue>,
}

impl DeviceRecord {
    pub fn new(id: DeviceId, name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner: owner.into(),
            props: HashMap::new(),
            states: HashMap::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Typed view of the configuration props
    pub fn props(&self) -> Props<'_> {
        Props(&self.props)
    }

    pub fn state(&self, key: &str) -> Option<&StateValue> {
        self.states.get(key)
    }

    pub fn state_bool(&self, key: &str, default: bool) -> bool {
        self.state(key).and_then(StateValue::as_bool).unwrap_or(default)
    }

    pub fn state_i64(&self, key: &str, default: i64) -> i64 {
        self.state(key).and_then(StateValue::as_i64).unwrap_or(default)
    }

    pub fn state_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.state(key).and_then(StateValue::as_str).unwrap_or(default)
    }
}

/// Borrowing accessor for configuration props with type coercion
pub struct Props<'a>(&'a HashMap<String, String>);

impl Props<'_> {
    pub fn str_or<'b>(&'b self, key: &str, default: &'b str) -> &'b str {
        match self.0.get(key) {
            Some(v) => v.as_str(),
            None => default,
        }
    }

    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.0
            .get(key)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(default)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.0
            .get(key)
            .and_then(|v| match v.as_str() {
                "true" | "True" | "1" => Some(true),
                "false" | "False" | "0" => Some(false),
                _ => None,
            })
            .unwrap_or(default)
    }

    /// String-encoded integer id; empty string means unconfigured
    pub fn device_id(&self, key: &str) -> Option<DeviceId> {
        self.0
            .get(key)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<u64>().ok())
            .map(DeviceId::new)
    }
}
