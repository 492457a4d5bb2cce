//! `to_toml`: structured mapping → TOML text.

use crate::codec::Codec;
use crate::error::{FilterError, Result};
use crate::value::Value;

pub(crate) const NAME: &str = "to_toml";

/// Body of the `to_toml` filter, run once the codec is known to be present.
///
/// The input must be a mapping. The TOML document comes back as a
/// [`Value::String`] so the filter composes with other filters.
pub(crate) fn to_toml_with(codec: &dyn Codec, input: &Value) -> Result<Value> {
    let Value::Map(entries) = input else {
        return Err(FilterError::Type {
            filter: NAME,
            expected: "mapping",
            actual: input.type_name().into(),
        });
    };
    encode_entries(codec, entries).map(Value::String)
}

pub(crate) fn encode_entries(codec: &dyn Codec, entries: &[(String, Value)]) -> Result<String> {
    codec
        .serialize(entries)
        .map_err(|e| FilterError::conversion(NAME, e))
}
