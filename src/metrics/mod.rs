//! Performance counters for the lore subsystem.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Fire-and-forget counters for cache behavior and refresh latency.
///
/// Recording uses relaxed atomics; readers get an eventually consistent
/// view, which is all an operator surface needs.
#[derive(Debug, Default)]
pub struct PerfMonitor {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    lore_updates: AtomicU64,
    update_total_ms: AtomicU64,
    update_max_ms: AtomicU64,
}

impl PerfMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one lore refresh and how long it took.
    pub fn record_lore_update(&self, elapsed: Duration) {
        let ms = elapsed.as_millis() as u64;
        self.lore_updates.fetch_add(1, Ordering::Relaxed);
        self.update_total_ms.fetch_add(ms, Ordering::Relaxed);
        self.update_max_ms.fetch_max(ms, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn lore_updates(&self) -> u64 {
        self.lore_updates.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> PerfSnapshot {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let updates = self.lore_updates();
        let total_ms = self.update_total_ms.load(Ordering::Relaxed);
        let lookups = hits + misses;

        PerfSnapshot {
            cache_hits: hits,
            cache_misses: misses,
            hit_ratio: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64
            },
            lore_updates: updates,
            avg_update_ms: if updates == 0 {
                0.0
            } else {
                total_ms as f64 / updates as f64
            },
            max_update_ms: self.update_max_ms.load(Ordering::Relaxed),
        }
    }
}

/// Counter values at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct PerfSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub hit_ratio: f64,
    pub lore_updates: u64,
    pub avg_update_ms: f64,
    pub max_update_ms: u64,
}
