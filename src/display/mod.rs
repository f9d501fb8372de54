//! Display layer - lore refresh with memoization.
//!
//! [`LoreUpdater`] is the refresh entry point: it derives the cache key from
//! counter state, serves repeat renders from [`LoreCache`], and renders
//! fresh lines through [`LoreRenderer`] on a miss. Owner names and template
//! placeholders come from host-provided [`OwnerResolver`] /
//! [`PlaceholderEngine`] adapters when present.

pub mod color;
mod renderer;

pub use renderer::{LoreRenderer, RenderContext};

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::binding::BindingView;
use crate::cache::{LoreCache, LoreKey};
use crate::config::Settings;
use crate::counter::INFINITE_USES;
use crate::item::ItemLike;
use crate::metrics::PerfMonitor;

/// Resolved owner identity, as far as the host knows it right now.
#[derive(Debug, Clone)]
pub struct OwnerProfile {
    pub id: Uuid,
    pub name: String,
}

/// Resolves owner ids to locally-known (online) profiles.
pub trait OwnerResolver: Send + Sync + 'static {
    fn lookup(&self, id: Uuid) -> Option<OwnerProfile>;
}

/// Substitutes template placeholders in decorative lines.
pub trait PlaceholderEngine: Send + Sync + 'static {
    fn apply(&self, ctx: &RenderContext<'_>, line: &str) -> String;
}

/// Built-in engine covering the crate's own placeholders:
/// `{owner}`, `{remaining}` and `{max}`.
#[derive(Debug, Default, Clone)]
pub struct BasicPlaceholders;

impl PlaceholderEngine for BasicPlaceholders {
    fn apply(&self, ctx: &RenderContext<'_>, line: &str) -> String {
        let remaining = if ctx.infinite {
            "∞".to_string()
        } else {
            ctx.remaining.to_string()
        };
        let max = if ctx.infinite {
            "∞".to_string()
        } else {
            ctx.max.to_string()
        };

        line.replace("{owner}", ctx.owner_name.unwrap_or(""))
            .replace("{remaining}", &remaining)
            .replace("{max}", &max)
    }
}

/// Applies rendered lore to items, memoizing by [`LoreKey`].
pub struct LoreUpdater<I: ItemLike> {
    cache: LoreCache,
    renderer: LoreRenderer,
    monitor: Arc<PerfMonitor>,
    bindings: Arc<dyn BindingView<I>>,
    resolver: Option<Arc<dyn OwnerResolver>>,
}

impl<I: ItemLike> LoreUpdater<I> {
    pub fn new(
        settings: Arc<Settings>,
        cache: LoreCache,
        monitor: Arc<PerfMonitor>,
        bindings: Arc<dyn BindingView<I>>,
        resolver: Option<Arc<dyn OwnerResolver>>,
        placeholders: Option<Arc<dyn PlaceholderEngine>>,
    ) -> Self {
        Self {
            cache,
            renderer: LoreRenderer::new(settings, placeholders),
            monitor,
            bindings,
            resolver,
        }
    }

    /// Refresh the item's lore for `remaining` out of `max`.
    ///
    /// `max <= 0` means there is nothing to render. Cached lines are applied
    /// as a value copy, so later cache churn cannot alias the item's state.
    pub fn refresh(&self, item: &mut I, remaining: i32, max: i32) {
        if !item.has_meta() || max <= 0 {
            return;
        }
        let started = Instant::now();

        let infinite = max == INFINITE_USES;
        let owner = if self.bindings.is_bound(item) {
            self.bindings.bound_owner(item)
        } else {
            None
        };

        let key = LoreKey {
            kind: item.kind().to_string(),
            remaining,
            max,
            infinite,
            owner,
        };

        if let Some(lines) = self.cache.get(&key) {
            self.monitor.record_cache_hit();
            item.set_lore(lines.as_ref().clone());
            self.monitor.record_lore_update(started.elapsed());
            return;
        }

        self.monitor.record_cache_miss();

        let profile = owner.and_then(|id| self.resolver.as_ref().and_then(|r| r.lookup(id)));
        let prefix = self.bindings.bind_lore_prefix();
        let ctx = RenderContext {
            remaining,
            max,
            infinite,
            owner,
            owner_name: profile.as_ref().map(|p| p.name.as_str()),
            bind_prefix: &prefix,
        };
        let lines = Arc::new(self.renderer.render(&ctx));

        item.set_lore(lines.as_ref().clone());
        self.cache.insert(key, lines);
        self.monitor.record_lore_update(started.elapsed());
    }

    /// The underlying cache, for maintenance and metrics surfaces.
    pub fn cache(&self) -> &LoreCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::config::CacheSettings;
    use crate::item::SimpleItem;

    /// Binds any item carrying the `test:owner_seed` attribute.
    struct SeededBindings;

    impl BindingView<SimpleItem> for SeededBindings {
        fn is_bound(&self, item: &SimpleItem) -> bool {
            item.attr("test:owner_seed").is_some()
        }

        fn bound_owner(&self, item: &SimpleItem) -> Option<Uuid> {
            item.attr("test:owner_seed")
                .map(|n| Uuid::from_u128(n as u128))
        }

        fn bind_lore_prefix(&self) -> String {
            "§7Owner: ".to_string()
        }
    }

    struct Harness {
        updater: LoreUpdater<SimpleItem>,
        monitor: Arc<PerfMonitor>,
        clock: Arc<ManualClock>,
        settings: Arc<Settings>,
    }

    fn harness() -> Harness {
        harness_with(|_| {})
    }

    fn harness_with(tweak: impl FnOnce(&mut Settings)) -> Harness {
        let mut settings = Settings::default();
        tweak(&mut settings);
        let settings = Arc::new(settings);

        let clock = Arc::new(ManualClock::new());
        let cache = LoreCache::new(settings.cache.clone(), clock.clone());
        let monitor = Arc::new(PerfMonitor::new());
        let updater = LoreUpdater::new(
            Arc::clone(&settings),
            cache,
            Arc::clone(&monitor),
            Arc::new(SeededBindings),
            None,
            None,
        );

        Harness {
            updater,
            monitor,
            clock,
            settings,
        }
    }

    #[test]
    fn miss_then_hit_then_expiry() {
        let h = harness();
        let mut item = SimpleItem::new("stone");

        h.updater.refresh(&mut item, 5, 10);
        assert_eq!(h.monitor.cache_misses(), 1);
        assert_eq!(h.monitor.cache_hits(), 0);
        let first = item.lore().unwrap().to_vec();
        assert!(!first.is_empty());

        h.updater.refresh(&mut item, 5, 10);
        assert_eq!(h.monitor.cache_hits(), 1);
        assert_eq!(item.lore().unwrap(), &first[..], "hit returns equal lines");

        h.clock.advance(h.settings.cache.ttl_ms + 1);
        h.updater.refresh(&mut item, 5, 10);
        assert_eq!(h.monitor.cache_misses(), 2);
    }

    #[test]
    fn owner_discriminates_irrelevant_attrs_do_not() {
        let h = harness();

        let mut owned_by_1 = SimpleItem::new("stone");
        owned_by_1.set_attr("test:owner_seed", 1);
        let mut owned_by_2 = SimpleItem::new("stone");
        owned_by_2.set_attr("test:owner_seed", 2);

        h.updater.refresh(&mut owned_by_1, 5, 10);
        h.updater.refresh(&mut owned_by_2, 5, 10);
        assert_eq!(h.monitor.cache_misses(), 2, "different owners, different entries");
        assert_eq!(h.updater.cache().len(), 2);

        // Same owner, different durability-ish attribute: same entry.
        let mut dinged = SimpleItem::new("stone");
        dinged.set_attr("test:owner_seed", 1);
        dinged.set_attr("durability", 37);
        h.updater.refresh(&mut dinged, 5, 10);
        assert_eq!(h.monitor.cache_hits(), 1);
        assert_eq!(h.updater.cache().len(), 2);
    }

    #[test]
    fn disabled_cache_always_renders() {
        let h = harness_with(|s| s.cache.enabled = false);
        let mut item = SimpleItem::new("stone");

        h.updater.refresh(&mut item, 5, 10);
        h.updater.refresh(&mut item, 5, 10);
        assert_eq!(h.monitor.cache_misses(), 2);
        assert_eq!(h.monitor.cache_hits(), 0);
        assert_eq!(h.updater.cache().len(), 0);
    }

    #[test]
    fn zero_max_is_a_no_op() {
        let h = harness();
        let mut item = SimpleItem::new("stone");

        h.updater.refresh(&mut item, 5, 0);
        assert_eq!(item.lore(), Some(&[][..]));
        assert_eq!(h.monitor.lore_updates(), 0);
    }

    #[test]
    fn every_refresh_records_a_timing_sample() {
        let h = harness();
        let mut item = SimpleItem::new("stone");

        h.updater.refresh(&mut item, 5, 10); // miss
        h.updater.refresh(&mut item, 5, 10); // hit
        assert_eq!(h.monitor.lore_updates(), 2);
    }

    #[test]
    fn resolver_names_the_owner_line() {
        struct KnownOwner;
        impl OwnerResolver for KnownOwner {
            fn lookup(&self, id: Uuid) -> Option<OwnerProfile> {
                Some(OwnerProfile {
                    id,
                    name: "Steve".to_string(),
                })
            }
        }

        let settings = Arc::new(Settings::default());
        let cache = LoreCache::new(CacheSettings::default(), Arc::new(ManualClock::new()));
        let updater = LoreUpdater::new(
            Arc::clone(&settings),
            cache,
            Arc::new(PerfMonitor::new()),
            Arc::new(SeededBindings),
            Some(Arc::new(KnownOwner)),
            None,
        );

        let mut item = SimpleItem::new("stone");
        item.set_attr("test:owner_seed", 5);
        updater.refresh(&mut item, 5, 10);
        assert!(
            item.lore()
                .unwrap()
                .iter()
                .any(|l| l == "§7Owner: Steve")
        );
    }
}
