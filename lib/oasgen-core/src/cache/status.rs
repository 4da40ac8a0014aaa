use serde::Serialize;

use super::StoreKind;

/// The administrative view of the cache.
///
/// Serializes with the `caching_enabled`, `cache_store`, `cache_ttl` (seconds),
/// `cache_debug`, `custom_key_generator`, `is_cached` and `cache_key` keys, the last one
/// only when caching is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    /// Whether caching is enabled.
    pub caching_enabled: bool,
    /// The kind of store.
    pub cache_store: StoreKind,
    /// The TTL of new entries, in seconds.
    pub cache_ttl: u64,
    /// Whether cache debug events are emitted.
    pub cache_debug: bool,
    /// Whether a custom key generator is configured.
    pub custom_key_generator: bool,
    /// Whether a document is cached for the request.
    pub is_cached: bool,
    /// The key of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
}
