use crate::cache::StoreKind;

/// Errors raised by an invalid configuration.
///
/// They abort the current call (a build, a status query, a clear) but never leave
/// partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum ConfigurationError {
    /// Caching is enabled, the selected store needs a custom key generator, and none is set.
    #[display(
        "cache_key_generator must be provided when caching is enabled with the {store} store"
    )]
    MissingKeyGenerator {
        /// The selected store.
        store: StoreKind,
    },

    /// An enumerated option received an unknown value.
    #[display("invalid value '{value}' for {option}, expected one of: {expected}")]
    InvalidOption {
        /// The option name.
        option: String,
        /// The rejected value.
        value: String,
        /// The accepted values.
        expected: String,
    },

    /// The API base path does not start with `/`.
    #[display("invalid api_path '{path}': must start with '/'")]
    InvalidApiPath {
        /// The rejected path.
        path: String,
    },

    /// A type expression used by a configuration option cannot be parsed.
    #[display("invalid type expression for {option}: {reason}")]
    InvalidTypeExpression {
        /// The option name.
        option: String,
        /// Why the expression was rejected.
        reason: String,
    },

    /// A server entry (static or computed) is not a well-formed server record.
    #[display("malformed server #{index} '{url}': {reason}")]
    MalformedServer {
        /// Position of the entry in the server list.
        index: usize,
        /// The offending URL.
        url: String,
        /// Why the entry was rejected.
        reason: String,
    },
}

impl ConfigurationError {
    pub(crate) fn invalid_option(
        option: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            option: option.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}
