use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use super::CacheError;
use crate::spec::Document;

/// The kind of a cache store, as reported by the cache status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// The in-process store.
    #[display("memory")]
    Memory,
    /// A store backed by an external keyed cache.
    #[display("external")]
    External,
}

/// Where assembled documents are kept between builds.
///
/// Implementations must be safe to share between concurrent builds.
pub trait CacheStore: Send + Sync {
    /// The kind of store.
    fn kind(&self) -> StoreKind;

    /// Whether keys must come from a custom key generator.
    ///
    /// The default key only distinguishes hosts and configuration options; a store
    /// shared by several processes usually needs a richer key.
    fn requires_key_generator(&self) -> bool {
        false
    }

    /// Reads a non-expired document.
    fn read(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Document>, CacheError>> + Send;

    /// Stores a document for `ttl`.
    fn write(
        &self,
        key: &str,
        document: &Document,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;

    /// Whether a non-expired document exists for the key.
    fn contains(&self, key: &str) -> impl Future<Output = Result<bool, CacheError>> + Send {
        async move { Ok(self.read(key).await?.is_some()) }
    }

    /// Removes the stored documents.
    ///
    /// Each store documents what it removes.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnsupportedClear`] if the store cannot scope the removal.
    fn clear(&self) -> impl Future<Output = Result<(), CacheError>> + Send;
}
