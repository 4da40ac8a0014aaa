use std::future::Future;
use std::time::Duration;

use super::{CacheError, CacheStore, StoreKind};
use crate::spec::Document;

/// Failure reported by a [`KeyValueBackend`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    /// Creates an error from its message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A client of an external keyed cache (Redis, Memcached, ...).
pub trait KeyValueBackend: Send + Sync {
    /// Reads a value.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, BackendError>> + Send;

    /// Writes a value that expires after `ttl`.
    fn set(
        &self,
        key: &str,
        value: String,
        ttl: Duration,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Atomically increments a counter, starting from zero, and returns the new value.
    fn increment(&self, key: &str) -> impl Future<Output = Result<u64, BackendError>> + Send;

    /// Deletes every key matching a glob pattern like `oas:*`.
    ///
    /// Returns the number of deleted keys, or `None` if the backend has no pattern
    /// deletion.
    fn delete_matched(
        &self,
        pattern: &str,
    ) -> impl Future<Output = Result<Option<u64>, BackendError>> + Send {
        let _ = pattern;
        async { Ok(None) }
    }
}

/// A store writing documents to an external keyed cache.
///
/// Every key is written under the store namespace. [`CacheStore::clear`] removes
/// `<namespace>:*` when the backend supports pattern deletion. Otherwise a versioned
/// store bumps its `<namespace>:version` counter, so that older entries are no longer
/// reachable and expire through their TTL. Without both, clearing fails with
/// [`CacheError::UnsupportedClear`].
///
/// By default the store requires a custom key generator.
#[derive(Debug)]
pub struct ExternalStore<B> {
    backend: B,
    namespace: String,
    versioned: bool,
    require_key_generator: bool,
}

impl<B> ExternalStore<B>
where
    B: KeyValueBackend,
{
    /// Creates a store writing under `namespace`.
    pub fn new(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            versioned: false,
            require_key_generator: true,
        }
    }

    /// Prefixes keys with a version counter that `clear` can bump.
    pub fn with_versioned_namespace(mut self, versioned: bool) -> Self {
        self.versioned = versioned;
        self
    }

    /// Whether a custom key generator is mandatory.
    pub fn require_key_generator(mut self, required: bool) -> Self {
        self.require_key_generator = required;
        self
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The namespace of the keys.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn version_key(&self) -> String {
        format!("{}:version", self.namespace)
    }

    async fn storage_key(&self, key: &str) -> Result<String, CacheError> {
        if !self.versioned {
            return Ok(format!("{}:{key}", self.namespace));
        }
        let version = self
            .backend
            .get(&self.version_key())
            .await
            .map_err(store_error)?
            .and_then(|it| it.parse::<u64>().ok())
            .unwrap_or_default();
        Ok(format!("{}:v{version}:{key}", self.namespace))
    }
}

fn store_error(source: BackendError) -> CacheError {
    CacheError::Store {
        store: StoreKind::External,
        source,
    }
}

impl<B> CacheStore for ExternalStore<B>
where
    B: KeyValueBackend,
{
    fn kind(&self) -> StoreKind {
        StoreKind::External
    }

    fn requires_key_generator(&self) -> bool {
        self.require_key_generator
    }

    async fn read(&self, key: &str) -> Result<Option<Document>, CacheError> {
        let key = self.storage_key(key).await?;
        let Some(raw) = self.backend.get(&key).await.map_err(store_error)? else {
            return Ok(None);
        };
        let document = serde_json::from_str(&raw)?;
        Ok(Some(document))
    }

    async fn write(&self, key: &str, document: &Document, ttl: Duration) -> Result<(), CacheError> {
        let key = self.storage_key(key).await?;
        let raw = serde_json::to_string(document)?;
        self.backend.set(&key, raw, ttl).await.map_err(store_error)
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let pattern = format!("{}:*", self.namespace);
        if let Some(deleted) = self
            .backend
            .delete_matched(&pattern)
            .await
            .map_err(store_error)?
        {
            tracing::debug!(%pattern, deleted, "cache entries deleted");
            return Ok(());
        }

        if self.versioned {
            let version = self
                .backend
                .increment(&self.version_key())
                .await
                .map_err(store_error)?;
            tracing::debug!(namespace = %self.namespace, version, "cache namespace version bumped");
            return Ok(());
        }

        Err(CacheError::UnsupportedClear {
            store: StoreKind::External,
            reason: format!(
                "the backend cannot delete keys matching '{pattern}' and the namespace is not versioned"
            ),
            remediation: "Use the memory store, enable a versioned namespace, or rely on TTL expiry"
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct MapBackend {
        entries: Mutex<HashMap<String, String>>,
        pattern_delete: bool,
    }

    impl KeyValueBackend for MapBackend {
        async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
            Ok(self.entries.lock().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: String, _ttl: Duration) -> Result<(), BackendError> {
            self.entries.lock().await.insert(key.to_string(), value);
            Ok(())
        }

        async fn increment(&self, key: &str) -> Result<u64, BackendError> {
            let mut entries = self.entries.lock().await;
            let next = entries
                .get(key)
                .and_then(|it| it.parse::<u64>().ok())
                .unwrap_or_default()
                + 1;
            entries.insert(key.to_string(), next.to_string());
            Ok(next)
        }

        async fn delete_matched(&self, pattern: &str) -> Result<Option<u64>, BackendError> {
            if !self.pattern_delete {
                return Ok(None);
            }
            let prefix = pattern.trim_end_matches('*');
            let mut entries = self.entries.lock().await;
            let before = entries.len();
            entries.retain(|key, _| !key.starts_with(prefix));
            Ok(Some((before - entries.len()) as u64))
        }
    }

    fn document() -> Document {
        serde_json::from_value(json!({ "openapi": "3.1.0" })).unwrap_or_default()
    }

    #[tokio::test]
    async fn should_write_under_namespace() -> Result<(), CacheError> {
        let store = ExternalStore::new(MapBackend::default(), "oas");

        store.write("key", &document(), Duration::from_secs(60)).await?;

        let keys = store.backend().entries.lock().await.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, ["oas:key"]);
        assert_eq!(store.read("key").await?, Some(document()));
        assert!(store.requires_key_generator());
        Ok(())
    }

    #[tokio::test]
    async fn should_clear_by_pattern() -> Result<(), CacheError> {
        let backend = MapBackend {
            pattern_delete: true,
            ..MapBackend::default()
        };
        let store = ExternalStore::new(backend, "oas");
        store.write("key", &document(), Duration::from_secs(60)).await?;

        store.clear().await?;

        assert!(!store.contains("key").await?);
        Ok(())
    }

    #[tokio::test]
    async fn should_clear_by_bumping_version() -> Result<(), CacheError> {
        let store = ExternalStore::new(MapBackend::default(), "oas").with_versioned_namespace(true);
        store.write("key", &document(), Duration::from_secs(60)).await?;
        assert!(store.contains("key").await?);

        store.clear().await?;

        assert!(!store.contains("key").await?);
        assert!(store.backend().entries.lock().await.contains_key("oas:v0:key"));
        Ok(())
    }

    #[tokio::test]
    async fn should_refuse_unscoped_clear() {
        let store = ExternalStore::new(MapBackend::default(), "oas");

        let result = store.clear().await;

        insta::assert_snapshot!(
            result.err().map(|it| it.to_string()).unwrap_or_default(),
            @"the external cache store cannot clear its entries: the backend cannot delete keys matching 'oas:*' and the namespace is not versioned. Use the memory store, enable a versioned namespace, or rely on TTL expiry"
        );
    }
}
