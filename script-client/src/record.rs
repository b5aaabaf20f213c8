//! AppleScript record parsing
//!
//! Player applications reply to status queries with an AppleScript record:
//!
//! ```text
//! {playerState:"playing", trackName:"Hey", trackDuration:180000, shuffling:false}
//! ```
//!
//! This module turns that free-text reply into a typed key/value map.
//! Splitting is quote- and depth-aware: a comma inside a quoted string or
//! inside nested braces does not end a field. Nested braced values are kept
//! as their raw text rather than expanded into a tree; nothing upstream
//! consumes more than one level.

use std::collections::HashMap;

use crate::ScriptError;

/// A single typed value from a record reply
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Boolean coercion; numeric values are truthy when non-zero
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            Value::Float(f) => Some(*f != 0.0),
            Value::Str(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// A parsed record reply
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    // Typed accessors with defaults, the shape every decoder wants.

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// Parse an AppleScript record reply into a [`Record`]
///
/// Returns an error only when the input is not braced record syntax at all;
/// individual fields that fail to split are skipped.
pub fn parse(reply: &str) -> Result<Record, ScriptError> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Err(ScriptError::Parse("empty reply".to_string()));
    }

    let inner = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| ScriptError::Parse(format!("not a record: {}", truncate(trimmed))))?;

    let mut record = Record::new();
    for part in split_fields(inner) {
        if let Some((key, value)) = part.split_once(':') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            record.insert(key, coerce(value.trim()));
        }
    }

    Ok(record)
}

/// Split the record body at top-level commas only
fn split_fields(body: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in body.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => {
                current.push(ch);
                escaped = true;
            }
            '"' => {
                current.push(ch);
                in_quotes = !in_quotes;
            }
            '{' | '[' if !in_quotes => {
                current.push(ch);
                depth += 1;
            }
            '}' | ']' if !in_quotes => {
                current.push(ch);
                depth = depth.saturating_sub(1);
            }
            ',' if !in_quotes && depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
}

/// Coerce a raw field value to the most specific type it parses as
fn coerce(raw: &str) -> Value {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Value::Str(raw[1..raw.len() - 1].replace("\\\"", "\""));
    }
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Float(f);
    }
    // Unquoted text (enum-ish values like `playing`) and nested records
    // both land here as raw strings.
    Value::Str(raw.to_string())
}

fn truncate(s: &str) -> String {
    match s.char_indices().nth(60) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
