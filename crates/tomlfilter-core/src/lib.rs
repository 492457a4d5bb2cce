//! # tomlfilter-core
//!
//! The `from_toml` and `to_toml` template filters: convert between TOML text
//! and the generic mapping/sequence/scalar [`Value`] a templating host works
//! with.
//!
//! Parsing and writing TOML is delegated to a [`Codec`] (the `toml` crate by
//! default). This crate does the rest: input type checks, the codec
//! availability guard, strict UTF-8 handling and wrapping every codec failure
//! into one [`FilterError::Conversion`] that keeps the original error as its
//! source.
//!
//! ## Quick start
//!
//! ```rust
//! use tomlfilter_core::{from_toml, to_toml, Value};
//!
//! let doc = from_toml(&Value::from("title = \"TOML Example\"")).unwrap();
//! assert_eq!(doc.get("title"), Some(&Value::from("TOML Example")));
//!
//! let text = to_toml(&doc).unwrap();
//! assert_eq!(text.as_str(), Some("title = \"TOML Example\"\n"));
//! ```
//!
//! ## Modules
//!
//! - [`filter`] — `Filter`, `FilterModule` and the availability guard
//! - [`codec`] — the `Codec` seam and the `toml`-backed `TomlCodec`
//! - [`value`] — `Value`, the structured value shared with the host
//! - [`error`] — `FilterError`

pub mod codec;
mod decoder;
mod encoder;
pub mod error;
pub mod filter;
pub mod value;

#[cfg(feature = "toml")]
pub use codec::TomlCodec;
pub use codec::{default_codec, Codec, HAS_TOML};
pub use error::{CodecError, FilterError, Result};
pub use filter::{Filter, FilterModule};
pub use value::Value;

/// Apply `from_toml` with the codec compiled into this build.
pub fn from_toml(input: &Value) -> Result<Value> {
    FilterModule::new().from_toml(input)
}

/// Apply `to_toml` with the codec compiled into this build.
pub fn to_toml(input: &Value) -> Result<Value> {
    FilterModule::new().to_toml(input)
}

/// Parse TOML text into a mapping [`Value`].
pub fn parse(text: &str) -> Result<Value> {
    FilterModule::new().parse(text)
}

/// Parse TOML from raw bytes, rejecting invalid UTF-8.
pub fn parse_slice(bytes: &[u8]) -> Result<Value> {
    FilterModule::new().parse_slice(bytes)
}

/// Serialize mapping entries into TOML text.
pub fn serialize(entries: &[(String, Value)]) -> Result<String> {
    FilterModule::new().serialize(entries)
}
