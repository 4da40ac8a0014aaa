use std::time::Duration;

use dashmap::DashMap;
use tokio::time::Instant;

use super::{CacheError, CacheStore, StoreKind};
use crate::spec::Document;

#[derive(Debug, Clone)]
struct CacheEntry {
    document: Document,
    stored_at: Instant,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }
}

/// The in-process store.
///
/// Entries expire once the time elapsed since they were stored exceeds their TTL; they
/// are evicted lazily, on the next read of their key. [`CacheStore::clear`] removes
/// every entry.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of held entries, expired ones included until they are evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The age of the entry stored under `key`, if any.
    pub fn age(&self, key: &str) -> Option<Duration> {
        self.entries.get(key).map(|entry| entry.stored_at.elapsed())
    }

    fn lookup(&self, key: &str) -> Option<Document> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key)
            && !entry.is_expired(now)
        {
            return Some(entry.document.clone());
        }
        // the read guard is released, eviction can lock the shard
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        None
    }
}

impl CacheStore for MemoryStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Memory
    }

    async fn read(&self, key: &str) -> Result<Option<Document>, CacheError> {
        Ok(self.lookup(key))
    }

    async fn write(&self, key: &str, document: &Document, ttl: Duration) -> Result<(), CacheError> {
        let stored_at = Instant::now();
        let entry = CacheEntry {
            document: document.clone(),
            stored_at,
            expires_at: stored_at.checked_add(ttl),
        };
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.entries.clear();
        Ok(())
    }
}
