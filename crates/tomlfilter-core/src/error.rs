//! Error types for the TOML filters.

use std::borrow::Cow;

use thiserror::Error;

/// Boxed error raised by a [`crate::Codec`], kept as the `source` of a
/// [`FilterError::Conversion`].
pub type CodecError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors a filter call can fail with. None of them are retried.
#[derive(Error, Debug)]
pub enum FilterError {
    /// The codec backing the filter is not available in this build.
    #[error("the \"{dependency}\" codec is required to run the {filter} filter but is not available")]
    MissingDependency {
        dependency: &'static str,
        filter: &'static str,
    },

    /// The filter was handed a value of the wrong shape. `actual` is the
    /// host's name for the type it received.
    #[error("{filter} requires a {expected}, got {actual}")]
    Type {
        filter: &'static str,
        expected: &'static str,
        actual: Cow<'static, str>,
    },

    /// The codec rejected the input (malformed TOML, unrepresentable value).
    /// `message` is the codec's own diagnostic.
    #[error("{filter} - {message}")]
    Conversion {
        filter: &'static str,
        message: String,
        #[source]
        source: CodecError,
    },

    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}

impl FilterError {
    /// Wrap a codec failure for `filter`, keeping the original error as the cause.
    pub fn conversion(filter: &'static str, source: impl Into<CodecError>) -> Self {
        let source = source.into();
        FilterError::Conversion {
            filter,
            message: source.to_string(),
            source,
        }
    }
}

/// Convenience alias used throughout tomlfilter-core.
pub type Result<T> = std::result::Result<T, FilterError>;
