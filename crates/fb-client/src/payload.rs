//! Decoded response payloads.
//!
//! The platform returns dynamically-shaped JSON. The decode mode, fixed at
//! client construction, selects the shape every decoded response is handed
//! back in; it is consumed only at this final decode step, never threaded
//! through the dispatch pipeline.

use serde_json::{Map, Value};

/// Shape returned to callers for decoded payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Return every payload as a raw `serde_json::Value` tree.
    #[default]
    Value,
    /// Flatten a top-level JSON object into a string-keyed map.
    ///
    /// Payloads whose top level is not an object (arrays, scalars) are
    /// returned unchanged as `Payload::Value`.
    Map,
}

/// A decoded response payload in the client's configured shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Structured value tree.
    Value(Value),
    /// Generic associative map of the top-level object.
    Map(Map<String, Value>),
}

impl Payload {
    /// Apply the decode mode to a raw value.
    pub fn from_value(mode: DecodeMode, value: Value) -> Self {
        match (mode, value) {
            (DecodeMode::Map, Value::Object(map)) => Payload::Map(map),
            (_, value) => Payload::Value(value),
        }
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Payload::Value(value) => value.get(key),
            Payload::Map(map) => map.get(key),
        }
    }

    /// Convert back into a plain `serde_json::Value`.
    pub fn into_value(self) -> Value {
        match self {
            Payload::Value(value) => value,
            Payload::Map(map) => Value::Object(map),
        }
    }
}
