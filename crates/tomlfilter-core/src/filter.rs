//! Filter registry and the codec availability guard.
//!
//! A [`Filter`] pairs a name with a conversion body. [`Filter::call`] and the
//! typed helpers on [`FilterModule`] all pass through one guard that checks
//! the codec is present; when it is missing the body never runs, whatever
//! the input.
//!
//! [`FilterModule`] is what a templating host registers. It owns the codec
//! handle and hands out the name → filter table.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::codec::{default_codec, Codec};
use crate::error::{FilterError, Result};
use crate::value::Value;
use crate::{decoder, encoder};

/// Library the filters need, named in missing-dependency errors.
const DEPENDENCY: &str = "toml";

/// The availability guard shared by every entry point.
fn require<'a>(codec: Option<&'a dyn Codec>, filter: &'static str) -> Result<&'a dyn Codec> {
    codec.ok_or(FilterError::MissingDependency {
        dependency: DEPENDENCY,
        filter,
    })
}

/// Every registered filter, in name order.
const REGISTERED: [Filter; 2] = [Filter::FROM_TOML, Filter::TO_TOML];

type FilterBody = fn(&dyn Codec, &Value) -> Result<Value>;

/// A named, single-argument conversion guarded by codec availability.
#[derive(Clone, Copy)]
pub struct Filter {
    name: &'static str,
    body: FilterBody,
}

impl Filter {
    /// TOML text → structured value.
    pub const FROM_TOML: Filter = Filter::guarded(decoder::NAME, decoder::from_toml_with);

    /// Structured mapping → TOML text.
    pub const TO_TOML: Filter = Filter::guarded(encoder::NAME, encoder::to_toml_with);

    /// Wrap `body` so that it only runs when a codec is present.
    pub const fn guarded(name: &'static str, body: FilterBody) -> Self {
        Self { name, body }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the filter on `input`.
    ///
    /// Fails with [`FilterError::MissingDependency`] when `codec` is `None`,
    /// before the input is looked at.
    pub fn call(&self, codec: Option<&dyn Codec>, input: &Value) -> Result<Value> {
        let codec = require(codec, self.name)?;
        tracing::debug!(
            filter = self.name,
            codec = codec.name(),
            input = input.type_name(),
            "applying filter"
        );
        let output = (self.body)(codec, input)?;
        tracing::trace!(filter = self.name, output = output.type_name(), "filter done");
        Ok(output)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("name", &self.name).finish()
    }
}

/// The `from_toml` / `to_toml` filters bound to a codec.
#[derive(Clone)]
pub struct FilterModule {
    codec: Option<Arc<dyn Codec>>,
}

impl FilterModule {
    /// Module using the codec compiled into this build, if any.
    pub fn new() -> Self {
        Self::with_codec(default_codec())
    }

    /// Module using `codec`. `None` makes every filter fail with
    /// [`FilterError::MissingDependency`].
    pub fn with_codec(codec: Option<Arc<dyn Codec>>) -> Self {
        Self { codec }
    }

    pub fn has_codec(&self) -> bool {
        self.codec.is_some()
    }

    /// Run only the availability guard for `filter`.
    ///
    /// Hosts that must inspect their native input before building a
    /// [`Value`] call this first so a missing codec still wins.
    pub fn ensure_codec(&self, filter: &Filter) -> Result<()> {
        require(self.codec.as_deref(), filter.name).map(|_| ())
    }

    /// Names of the registered filters, sorted.
    pub fn names() -> [&'static str; 2] {
        REGISTERED.map(|filter| filter.name)
    }

    /// The name → filter table handed to the templating host.
    pub fn filters(&self) -> BTreeMap<&'static str, Filter> {
        REGISTERED
            .into_iter()
            .map(|filter| (filter.name, filter))
            .collect()
    }

    /// Invoke the filter registered as `name`.
    pub fn apply(&self, name: &str, input: &Value) -> Result<Value> {
        let filter = self
            .filters()
            .remove(name)
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))?;
        filter.call(self.codec.as_deref(), input)
    }

    pub fn from_toml(&self, input: &Value) -> Result<Value> {
        Filter::FROM_TOML.call(self.codec.as_deref(), input)
    }

    pub fn to_toml(&self, input: &Value) -> Result<Value> {
        Filter::TO_TOML.call(self.codec.as_deref(), input)
    }

    /// Parse TOML text without wrapping it in a [`Value`] first.
    pub fn parse(&self, text: &str) -> Result<Value> {
        decoder::decode_str(require(self.codec.as_deref(), decoder::NAME)?, text)
    }

    /// Parse raw bytes, which must be valid UTF-8.
    pub fn parse_slice(&self, bytes: &[u8]) -> Result<Value> {
        decoder::decode_slice(require(self.codec.as_deref(), decoder::NAME)?, bytes)
    }

    /// Serialize mapping entries to TOML text.
    pub fn serialize(&self, entries: &[(String, Value)]) -> Result<String> {
        encoder::encode_entries(require(self.codec.as_deref(), encoder::NAME)?, entries)
    }
}

impl Default for FilterModule {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FilterModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterModule")
            .field("codec", &self.codec.as_ref().map(|c| c.name()))
            .finish()
    }
}
