//! `from_toml`: TOML text → structured value.

use crate::codec::Codec;
use crate::error::{FilterError, Result};
use crate::value::Value;

pub(crate) const NAME: &str = "from_toml";

/// Body of the `from_toml` filter, run once the codec is known to be present.
///
/// The input must be a string; the parsed document is returned exactly as the
/// codec produced it.
pub(crate) fn from_toml_with(codec: &dyn Codec, input: &Value) -> Result<Value> {
    let Value::String(text) = input else {
        return Err(FilterError::Type {
            filter: NAME,
            expected: "string",
            actual: input.type_name().into(),
        });
    };
    decode_str(codec, text)
}

pub(crate) fn decode_str(codec: &dyn Codec, text: &str) -> Result<Value> {
    codec
        .parse(text)
        .map_err(|e| FilterError::conversion(NAME, e))
}

/// Strictly decode `bytes` as UTF-8, then parse. Malformed byte sequences are
/// reported as a conversion error instead of being replaced.
pub(crate) fn decode_slice(codec: &dyn Codec, bytes: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(bytes).map_err(|e| FilterError::conversion(NAME, e))?;
    decode_str(codec, text)
}
