//! Memoization of assembled documents.
//!
//! A [`CacheLayer`] wraps the [`SpecificationAssembler`] with a [`CacheStore`]: a build
//! derives a key from the configuration and the request, returns the stored document
//! on a hit, and assembles then stores it on a miss. Concurrent builds of the same key
//! share one assembly.
//!
//! ```rust
//! use oasgen_core::cache::{CacheLayer, MemoryStore};
//! use oasgen_core::route::{RouteRecord, StaticMetadataSource, Verb};
//! use oasgen_core::Configuration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), oasgen_core::cache::CacheError> {
//! let config = Configuration::builder().with_caching(true).build()?;
//! let cache = CacheLayer::new(config, MemoryStore::new());
//! let source = StaticMetadataSource::new()
//!     .with_route(RouteRecord::new(Verb::Get, "/users", "users", "index"));
//!
//! let document = cache.build(&source, None).await?;
//!
//! assert!(cache.is_cached(None).await?);
//! assert_eq!(cache.build(&source, None).await?, document);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock};

use crate::config::{Configuration, RequestContext};
use crate::route::MetadataSource;
use crate::spec::Document;
use crate::SpecificationAssembler;

mod error;
mod external;
mod key;
mod memory;
mod status;
mod store;

pub use self::error::CacheError;
pub use self::external::{BackendError, ExternalStore, KeyValueBackend};
pub use self::key::default_key;
pub use self::memory::MemoryStore;
pub use self::status::CacheStatus;
pub use self::store::{CacheStore, StoreKind};

/// Memoizes assembled documents in a store.
///
/// The configuration is held as a snapshot: each call reads it once at its start, and
/// [`CacheLayer::reconfigure`] only affects later calls.
#[derive(Debug)]
pub struct CacheLayer<S = MemoryStore> {
    config: RwLock<Arc<Configuration>>,
    store: S,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl<S> CacheLayer<S>
where
    S: CacheStore,
{
    /// Creates a cache layer.
    pub fn new(config: Configuration, store: S) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            store,
            in_flight: DashMap::new(),
        }
    }

    /// The current configuration snapshot.
    pub async fn configuration(&self) -> Arc<Configuration> {
        Arc::clone(&*self.config.read().await)
    }

    /// Replaces the configuration for the next calls.
    pub async fn reconfigure(&self, config: Configuration) {
        *self.config.write().await = Arc::new(config);
    }

    /// The store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the document for the request.
    ///
    /// Without caching, every call assembles a fresh document. With caching, a stored
    /// document is returned unchanged, otherwise the document is assembled and stored
    /// with the configured TTL.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Configuration`] if the store needs a custom key generator and none
    ///   is configured, or if the servers are malformed
    /// - [`CacheError::Store`] if the store fails
    pub async fn build<M>(
        &self,
        source: &M,
        ctx: Option<&RequestContext>,
    ) -> Result<Document, CacheError>
    where
        M: MetadataSource + Sync + ?Sized,
    {
        let config = self.configuration().await;
        if !config.cache().enabled() {
            return assemble(&config, &source, ctx);
        }

        let key = self.key(&config, ctx)?;
        if let Some(document) = self.store.read(&key).await? {
            debug(&config, &key, "cache hit");
            return Ok(document);
        }

        let lock = Arc::clone(self.in_flight.entry(key.clone()).or_default().value());
        let result = {
            let _guard = lock.lock().await;
            self.build_missing(&config, &key, source, ctx).await
        };
        self.in_flight
            .remove_if(&key, |_, it| Arc::ptr_eq(it, &lock) && Arc::strong_count(it) == 2);
        result
    }

    /// Assembles and stores the document, unless a concurrent build just stored it.
    async fn build_missing<M>(
        &self,
        config: &Configuration,
        key: &str,
        source: &M,
        ctx: Option<&RequestContext>,
    ) -> Result<Document, CacheError>
    where
        M: MetadataSource + Sync + ?Sized,
    {
        if let Some(document) = self.store.read(key).await? {
            debug(config, key, "cache filled by a concurrent build");
            return Ok(document);
        }

        debug(config, key, "cache miss");
        let document = assemble(config, &source, ctx)?;
        self.store
            .write(key, &document, config.cache().ttl())
            .await?;
        debug(config, key, "document stored");
        Ok(document)
    }

    /// Whether a non-expired document is stored for the request.
    ///
    /// Always `false` when caching is disabled.
    ///
    /// # Errors
    ///
    /// Same as [`CacheLayer::build`], without the assembly errors.
    pub async fn is_cached(&self, ctx: Option<&RequestContext>) -> Result<bool, CacheError> {
        let config = self.configuration().await;
        if !config.cache().enabled() {
            return Ok(false);
        }
        let key = self.key(&config, ctx)?;
        self.store.contains(&key).await
    }

    /// Removes the stored documents; see the store documentation for its scope.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnsupportedClear`] if the store cannot scope the removal,
    /// or [`CacheError::Store`] if it fails.
    pub async fn clear(&self) -> Result<(), CacheError> {
        let config = self.configuration().await;
        self.store.clear().await?;
        if config.cache().debug() {
            tracing::debug!(store = %self.store.kind(), "cache cleared");
        }
        Ok(())
    }

    /// The key of the request, `None` when caching is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Configuration`] if the store needs a custom key generator
    /// and none is configured.
    pub async fn cache_key(&self, ctx: Option<&RequestContext>) -> Result<Option<String>, CacheError> {
        let config = self.configuration().await;
        if !config.cache().enabled() {
            return Ok(None);
        }
        self.key(&config, ctx).map(Some)
    }

    /// The administrative view of the cache for the request.
    ///
    /// # Errors
    ///
    /// Same as [`CacheLayer::is_cached`].
    pub async fn status(&self, ctx: Option<&RequestContext>) -> Result<CacheStatus, CacheError> {
        let config = self.configuration().await;
        let cache = config.cache();
        let (is_cached, cache_key) = if cache.enabled() {
            let key = self.key(&config, ctx)?;
            (self.store.contains(&key).await?, Some(key))
        } else {
            (false, None)
        };

        Ok(CacheStatus {
            caching_enabled: cache.enabled(),
            cache_store: self.store.kind(),
            cache_ttl: cache.ttl().as_secs(),
            cache_debug: cache.debug(),
            custom_key_generator: cache.key_generator().is_some(),
            is_cached,
            cache_key,
        })
    }

    fn key(&self, config: &Configuration, ctx: Option<&RequestContext>) -> Result<String, CacheError> {
        let key = key::derive_key(
            config,
            ctx,
            self.store.kind(),
            self.store.requires_key_generator(),
        )?;
        debug(config, &key, "cache key derived");
        Ok(key)
    }
}

fn assemble(
    config: &Configuration,
    source: &dyn MetadataSource,
    ctx: Option<&RequestContext>,
) -> Result<Document, CacheError> {
    let spec = SpecificationAssembler::new(config).assemble(source, ctx)?;
    Ok(Document::from(&spec))
}

fn debug(config: &Configuration, key: &str, message: &str) {
    if config.cache().debug() {
        tracing::debug!(%key, "{message}");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::config::CacheKeyGenerator;
    use crate::route::StaticMetadataSource;

    fn enabled() -> Configuration {
        Configuration::builder()
            .with_caching(true)
            .with_cache_ttl(Duration::from_secs(120))
            .build()
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn should_report_status() -> Result<(), CacheError> {
        let cache = CacheLayer::new(enabled(), MemoryStore::new());
        let _ = cache.build(&StaticMetadataSource::new(), None).await?;

        let status = cache.status(None).await?;

        assert_eq!(
            serde_json::to_value(&status)?,
            json!({
                "caching_enabled": true,
                "cache_store": "memory",
                "cache_ttl": 120,
                "cache_debug": false,
                "custom_key_generator": false,
                "is_cached": true,
                "cache_key": "oas_spec___all__development_default"
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn should_omit_key_when_disabled() -> Result<(), CacheError> {
        let cache = CacheLayer::new(Configuration::default(), MemoryStore::new());

        let status = serde_json::to_value(cache.status(None).await?)?;

        assert_eq!(status.get("cache_key"), None);
        assert_eq!(status.get("is_cached"), Some(&json!(false)));
        assert_eq!(cache.cache_key(None).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn should_apply_reconfiguration_to_next_calls() -> Result<(), CacheError> {
        let cache = CacheLayer::new(Configuration::default(), MemoryStore::new());
        let _ = cache.build(&StaticMetadataSource::new(), None).await?;
        assert!(cache.store().is_empty());

        let config = Configuration::builder()
            .with_caching(true)
            .with_cache_key_generator(CacheKeyGenerator::new(|_, _| "static".to_string()))
            .build()?;
        cache.reconfigure(config).await;
        let _ = cache.build(&StaticMetadataSource::new(), None).await?;

        assert_eq!(cache.cache_key(None).await?.as_deref(), Some("static"));
        assert_eq!(cache.store().len(), 1);
        Ok(())
    }
}
