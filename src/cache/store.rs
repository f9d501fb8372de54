//! Concurrent lore entry store.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use super::Clock;
use crate::config::CacheSettings;

/// Composite key for one rendered lore variant.
///
/// Items that differ only in attributes outside this key share an entry;
/// that collapse is the point of the memoization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoreKey {
    pub kind: String,
    pub remaining: i32,
    pub max: i32,
    pub infinite: bool,
    pub owner: Option<Uuid>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    lines: Arc<Vec<String>>,
    inserted_ms: u64,
}

/// Time-expiring, size-bounded store of rendered lore lines.
///
/// Entries may be pruned by one path while read by another; `DashMap` keeps
/// that safe without an outer lock.
pub struct LoreCache {
    entries: DashMap<LoreKey, CacheEntry>,
    clock: Arc<dyn Clock>,
    settings: CacheSettings,
}

impl LoreCache {
    pub fn new(settings: CacheSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            settings,
        }
    }

    /// Look up unexpired lines for `key`.
    ///
    /// Always misses when caching is disabled. A stale entry found here is
    /// evicted before the miss is returned.
    pub fn get(&self, key: &LoreKey) -> Option<Arc<Vec<String>>> {
        if !self.settings.enabled {
            return None;
        }
        let now = self.clock.now_millis();
        let stale = match self.entries.get(key) {
            Some(entry) if now.saturating_sub(entry.inserted_ms) <= self.settings.ttl_ms => {
                return Some(Arc::clone(&entry.lines));
            }
            Some(_) => true,
            None => false,
        };
        if stale {
            self.entries.remove(key);
        }
        None
    }

    /// Store freshly rendered lines under `key`.
    ///
    /// No-op when caching is disabled. When the insert leaves the store
    /// above `max_size`, expired entries are swept.
    pub fn insert(&self, key: LoreKey, lines: Arc<Vec<String>>) {
        if !self.settings.enabled {
            return;
        }
        self.entries.insert(
            key,
            CacheEntry {
                lines,
                inserted_ms: self.clock.now_millis(),
            },
        );
        if self.entries.len() > self.settings.max_size {
            self.clean_expired();
        }
    }

    /// Sweep every entry older than the TTL.
    pub fn clean_expired(&self) {
        let now = self.clock.now_millis();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.inserted_ms) <= self.settings.ttl_ms);
        let evicted = before.saturating_sub(self.entries.len());
        if evicted > 0 {
            debug!("evicted {} expired lore cache entries", evicted);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
