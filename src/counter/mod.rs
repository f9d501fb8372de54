//! Use-count core.
//!
//! [`CounterStore`] owns the two counter attributes on items: the current
//! remaining uses and the ceiling. Every mutation is synchronous on the
//! caller's context; bound finite items additionally get their external
//! binding record refreshed by a fire-and-forget task working on a value
//! snapshot of the item.

use std::sync::Arc;

use tracing::warn;

use crate::binding::{BindingStore, BindingView, sync_binding_uses};
use crate::config::Settings;
use crate::display::{LoreUpdater, color};
use crate::item::{ATTR_MAX_USES, ATTR_USES, ItemLike};
use crate::runtime::TaskExecutor;

/// Raw attribute value standing in for "unlimited" on the storage side.
///
/// Everything above the attribute boundary works with [`UseCount`]; the
/// sentinel survives only so externally stored items keep their meaning.
pub const INFINITE_USES: i32 = i32::MAX - 100;

/// A use counter: either a finite remaining count or unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseCount {
    Finite(i32),
    Infinite,
}

impl UseCount {
    /// Decode a raw attribute value.
    pub fn from_raw(raw: i32) -> Self {
        if raw == INFINITE_USES {
            Self::Infinite
        } else {
            Self::Finite(raw)
        }
    }

    /// Encode back to the raw attribute value.
    pub fn raw(self) -> i32 {
        match self {
            Self::Finite(n) => n,
            Self::Infinite => INFINITE_USES,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// One use consumed. Infinite counts are unchanged; finite counts
    /// saturate at zero.
    pub fn decremented(self) -> Self {
        match self {
            Self::Infinite => Self::Infinite,
            Self::Finite(n) => Self::Finite((n - 1).max(0)),
        }
    }
}

/// Owns the durable counter attributes on items and drives lore refreshes.
pub struct CounterStore<I: ItemLike> {
    settings: Arc<Settings>,
    bindings: Arc<dyn BindingView<I>>,
    store: Arc<dyn BindingStore>,
    executor: Arc<dyn TaskExecutor>,
    display: Arc<LoreUpdater<I>>,
}

impl<I: ItemLike> CounterStore<I> {
    pub fn new(
        settings: Arc<Settings>,
        bindings: Arc<dyn BindingView<I>>,
        store: Arc<dyn BindingStore>,
        executor: Arc<dyn TaskExecutor>,
        display: Arc<LoreUpdater<I>>,
    ) -> Self {
        Self {
            settings,
            bindings,
            store,
            executor,
            display,
        }
    }

    /// Write a use count. `-1` means unlimited; any other value is the new
    /// current count (and the ceiling, the first time one is written).
    pub fn set_use_times(&self, item: &mut I, times: i32) {
        let count = if times == -1 {
            UseCount::Infinite
        } else {
            UseCount::Finite(times)
        };
        self.set_uses(item, count);
    }

    /// Write a use count.
    ///
    /// `Infinite` overwrites both attributes unconditionally. A finite count
    /// writes the ceiling only if none is recorded yet. Items without
    /// metadata are left untouched.
    pub fn set_uses(&self, item: &mut I, count: UseCount) {
        if !item.has_meta() {
            return;
        }
        match count {
            UseCount::Infinite => {
                item.set_attr(ATTR_USES, INFINITE_USES);
                item.set_attr(ATTR_MAX_USES, INFINITE_USES);
            }
            UseCount::Finite(n) => {
                item.set_attr(ATTR_USES, n);
                if item.attr(ATTR_MAX_USES).is_none() {
                    item.set_attr(ATTR_MAX_USES, n);
                }
            }
        }
        self.update_lore(item, count.raw());
    }

    /// Stored current count, 0 when absent.
    pub fn use_times(&self, item: &I) -> i32 {
        item.attr(ATTR_USES).unwrap_or(0)
    }

    /// Tagged view of the stored current count.
    pub fn uses(&self, item: &I) -> UseCount {
        UseCount::from_raw(self.use_times(item))
    }

    /// Consume one use and return the new current count.
    ///
    /// The counter is written back synchronously before any side effect;
    /// finite counts saturate at zero. Unlimited items skip the binding
    /// store entirely. For bound finite items, a background task pushes the
    /// new count into the owner's binding record, working on a snapshot of
    /// the item; its failure is logged and never affects the returned value.
    pub fn decrement_use_times(&self, item: &mut I) -> i32 {
        let current = self.use_times(item);
        if !item.has_meta() {
            return current;
        }

        let next = UseCount::from_raw(current).decremented();
        item.set_attr(ATTR_USES, next.raw());

        let max = self.max_use_times(item);
        if UseCount::from_raw(max).is_infinite() {
            self.update_lore(item, next.raw());
            return next.raw();
        }

        if self.bindings.is_bound(item) {
            if let Some(owner) = self.bindings.bound_owner(item) {
                let store = Arc::clone(&self.store);
                let snapshot = item.clone();
                let uses = next.raw();
                self.executor.submit(Box::pin(async move {
                    if let Err(e) = sync_binding_uses(store, owner, snapshot, uses).await {
                        warn!("failed to sync binding uses for owner {}: {}", owner, e);
                    }
                }));
            }
        }

        self.update_lore(item, next.raw());
        next.raw()
    }

    /// Stored ceiling, or 0 for items the marker predicate rejects.
    ///
    /// A counted item with no recorded ceiling gets the configured default
    /// written back: a read with a deliberate, idempotent side effect that
    /// keeps the progress-bar math stable across calls.
    pub fn max_use_times(&self, item: &mut I) -> i32 {
        if !self.is_counted(item) {
            return 0;
        }
        match item.attr(ATTR_MAX_USES) {
            Some(max) => max,
            None => {
                let default = self.settings.default_uses;
                item.set_attr(ATTR_MAX_USES, default);
                default
            }
        }
    }

    /// Overwrite the ceiling unconditionally. Does not refresh the lore.
    pub fn set_max_use_times(&self, item: &mut I, max: i32) {
        item.set_attr(ATTR_MAX_USES, max);
    }

    /// Reset the current count to the configured default. Leaves the
    /// ceiling untouched.
    pub fn reset_use_times(&self, item: &mut I) {
        item.set_attr(ATTR_USES, self.settings.default_uses);
    }

    /// Whether the item carries the marker line.
    ///
    /// Compared with color codes stripped, so reformatted lore still
    /// classifies.
    pub fn is_counted(&self, item: &I) -> bool {
        let marker = color::strip(&self.settings.display.marker_line);
        item.lore()
            .map(|lines| lines.iter().any(|l| color::strip(l) == marker))
            .unwrap_or(false)
    }

    /// Recompute and apply the item's lore for `remaining` uses.
    pub fn update_lore(&self, item: &mut I, remaining: i32) {
        let max = self.max_use_times(item);
        self.display.refresh(item, remaining, max);
    }
}
