//! Structured value shared with the templating host.
//!
//! `Value` is the generic mapping/sequence/scalar tree that `from_toml`
//! produces and `to_toml` consumes. It carries no TOML identity: datetimes
//! are kept as their RFC 3339 text so other data-interchange filters can pass
//! them along unchanged.

use serde_json::{Map as JsonMap, Number, Value as JsonValue};

/// A host-side structured value. Separates integers from floats (TOML does)
/// and uses `Vec<(String, Value)>` for mappings to keep insertion order
/// without depending on `IndexMap`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// TOML date, time or date-time in its canonical text form,
    /// e.g. `1979-05-27T07:32:00Z` or `1979-05-27`.
    Datetime(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Lowercase name of the variant, used in type-error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Datetime(_) => "datetime",
            Value::Array(_) => "array",
            Value::Map(_) => "mapping",
        }
    }

    /// Look up `key` in a mapping. Returns `None` for non-mappings.
    ///
    /// If the mapping holds the key more than once, the first entry wins.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Structural equality that ignores mapping key order.
    ///
    /// The codec may move sub-tables behind plain keys when serializing, so
    /// round-trip comparisons use this rather than `==`.
    pub fn same_content(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, left)| {
                        other
                            .get(key)
                            .is_some_and(|right| left.same_content(right))
                    })
                    && b.iter().all(|(key, _)| self.get(key).is_some())
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(l, r)| l.same_content(r))
            }
            (Value::Float(a), Value::Float(b)) if a.is_nan() && b.is_nan() => true,
            (a, b) => a == b,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<JsonValue> for Value {
    /// JSON numbers that fit in `i64` become integers, everything else a float.
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for JsonValue {
    /// Datetimes become strings. Non-finite floats have no JSON form and
    /// become `null`, matching `serde_json`'s own behavior.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Integer(i) => JsonValue::Number(i.into()),
            Value::Float(f) => Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number),
            Value::String(s) | Value::Datetime(s) => JsonValue::String(s),
            Value::Array(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
            Value::Map(entries) => {
                let mut map = JsonMap::new();
                for (k, v) in entries {
                    map.insert(k, JsonValue::from(v));
                }
                JsonValue::Object(map)
            }
        }
    }
}
