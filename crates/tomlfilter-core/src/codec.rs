//! The codec seam: the external library that actually parses and writes TOML.
//!
//! Filters never touch the `toml` crate directly. They go through a
//! [`Codec`], and a build without the `toml` feature simply has no codec,
//! which the availability guard in [`crate::filter`] reports per call.

use std::sync::Arc;

use crate::error::CodecError;
use crate::value::Value;

/// `true` when this build carries the `toml` codec.
pub const HAS_TOML: bool = cfg!(feature = "toml");

/// A TOML parser/serializer treated as a black box.
pub trait Codec: Send + Sync {
    /// Name of the library behind this codec, reported when it is missing.
    fn name(&self) -> &'static str;

    /// Parse a TOML document into a mapping value.
    fn parse(&self, text: &str) -> std::result::Result<Value, CodecError>;

    /// Serialize the entries of a mapping into a TOML document.
    fn serialize(&self, entries: &[(String, Value)]) -> std::result::Result<String, CodecError>;
}

/// The codec compiled into this build, if any.
pub fn default_codec() -> Option<Arc<dyn Codec>> {
    #[cfg(feature = "toml")]
    {
        Some(Arc::new(TomlCodec))
    }
    #[cfg(not(feature = "toml"))]
    {
        None
    }
}

#[cfg(feature = "toml")]
pub use self::toml_codec::TomlCodec;

#[cfg(feature = "toml")]
mod toml_codec {
    use std::collections::HashSet;

    use super::Codec;
    use crate::error::CodecError;
    use crate::value::Value;

    /// [`Codec`] backed by the `toml` crate (built with `preserve_order`).
    #[derive(Debug, Clone, Copy, Default)]
    pub struct TomlCodec;

    impl Codec for TomlCodec {
        fn name(&self) -> &'static str {
            "toml"
        }

        fn parse(&self, text: &str) -> Result<Value, CodecError> {
            let table: toml::Table = toml::from_str(text)?;
            Ok(from_table(table))
        }

        fn serialize(&self, entries: &[(String, Value)]) -> Result<String, CodecError> {
            let table = to_table(entries)?;
            Ok(toml::to_string(&table)?)
        }
    }

    fn from_table(table: toml::Table) -> Value {
        Value::Map(
            table
                .into_iter()
                .map(|(key, value)| (key, from_toml_value(value)))
                .collect(),
        )
    }

    fn from_toml_value(value: toml::Value) -> Value {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Integer(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::Datetime(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Array(items.into_iter().map(from_toml_value).collect())
            }
            toml::Value::Table(table) => from_table(table),
        }
    }

    /// Build a TOML table from mapping entries. Null entries are dropped,
    /// since TOML has no null and a missing key is the closest reading.
    fn to_table(entries: &[(String, Value)]) -> Result<toml::Table, CodecError> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut table = toml::Table::new();
        for (key, value) in entries {
            if !seen.insert(key.as_str()) {
                return Err(format!("duplicate key `{key}` in mapping").into());
            }
            if matches!(value, Value::Null) {
                continue;
            }
            table.insert(key.clone(), to_toml_value(value)?);
        }
        Ok(table)
    }

    fn to_toml_value(value: &Value) -> Result<toml::Value, CodecError> {
        let converted = match value {
            Value::Null => return Err("null values inside arrays cannot be represented in TOML".into()),
            Value::Bool(b) => toml::Value::Boolean(*b),
            Value::Integer(i) => toml::Value::Integer(*i),
            Value::Float(f) => toml::Value::Float(*f),
            Value::String(s) => toml::Value::String(s.clone()),
            Value::Datetime(text) => toml::Value::Datetime(
                text.parse::<toml::value::Datetime>()
                    .map_err(|e| format!("invalid datetime `{text}`: {e}"))?,
            ),
            Value::Array(items) => toml::Value::Array(
                items.iter().map(to_toml_value).collect::<Result<_, _>>()?,
            ),
            Value::Map(entries) => toml::Value::Table(to_table(entries)?),
        };
        Ok(converted)
    }

}
