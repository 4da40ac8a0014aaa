use super::{BackendError, StoreKind};
use crate::config::ConfigurationError;

/// Errors raised by the cache layer.
///
/// A failing store is reported as is: a build never falls back to a fresh assembly
/// when the store cannot be read or written.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum CacheError {
    /// The configuration does not allow the call.
    #[display("{_0}")]
    Configuration(ConfigurationError),

    /// The store backend failed.
    #[display("{store} cache store failure: {source}")]
    #[from(skip)]
    Store {
        /// The failing store.
        store: StoreKind,
        /// The backend error.
        source: BackendError,
    },

    /// A document cannot be encoded or decoded by the store.
    #[display("cannot encode the cached document: {_0}")]
    Serialization(serde_json::Error),

    /// The store cannot remove the documents it holds.
    #[display("the {store} cache store cannot clear its entries: {reason}. {remediation}")]
    #[from(skip)]
    UnsupportedClear {
        /// The store.
        store: StoreKind,
        /// What the store lacks.
        reason: String,
        /// How to get a working clear.
        remediation: String,
    },
}
