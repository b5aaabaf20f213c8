//! State values and published state updates

use std::fmt;

/// A single state value on a device record
///
/// The host stores states loosely typed; this enum covers the three
/// shapes the players actually publish. The string rendering is what
/// lands in mirrored variables.
#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl StateValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StateValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StateValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Bool(b) => write!(f, "{}", b),
            StateValue::Int(i) => write!(f, "{}", i),
            StateValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        StateValue::Bool(v)
    }
}

impl From<i64> for StateValue {
    fn from(v: i64) -> Self {
        StateValue::Int(v)
    }
}

impl From<u32> for StateValue {
    fn from(v: u32) -> Self {
        StateValue::Int(v as i64)
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        StateValue::Str(v)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        StateValue::Str(v.to_string())
    }
}

/// One `{key, value}` pair in an ordered state publish
#[derive(Debug, Clone, PartialEq)]
pub struct StateUpdate {
    pub key: String,
    pub value: StateValue,
}

impl StateUpdate {
    pub fn new(key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_for_variables() {
        assert_eq!(StateValue::Bool(true).to_string(), "true");
        assert_eq!(StateValue::Int(42).to_string(), "42");
        assert_eq!(StateValue::Str("▶ Abbey Road".into()).to_string(), "▶ Abbey Road");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(StateValue::Bool(true).as_bool(), Some(true));
        assert_eq!(StateValue::Int(5).as_i64(), Some(5));
        assert_eq!(StateValue::Str("x".into()).as_str(), Some("x"));
        assert_eq!(StateValue::Int(5).as_bool(), None);
    }

    #[test]
    fn test_state_update_from_conversions() {
        let update = StateUpdate::new("isPlaying", true);
        assert_eq!(update.key, "isPlaying");
        assert_eq!(update.value, StateValue::Bool(true));
    }
}
