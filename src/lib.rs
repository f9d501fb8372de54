//! Usebound - use-count semantics for game-server items.
//!
//! Attaches a durable current/max use counter to item-like values and keeps
//! a decorative description (lore) in sync with it: remaining/maximum uses,
//! a progress bar and binding-owner information, memoized in a small
//! time-windowed cache so repeated mutations don't re-render.
//!
//! ## Architecture
//!
//! - `config` - Settings with serde defaults and env loading
//! - `item` - Item abstraction the core mutates
//! - `counter` - Current/max use counters on item metadata
//! - `display` - Lore rendering and refresh
//! - `cache` - Time-windowed memoization of rendered lore
//! - `binding` - Owner bindings and their persistence seam
//! - `metrics` - Cache and refresh performance counters
//! - `runtime` - Fire-and-forget task execution seam
//! - `error` - Crate error types
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use usebound::{
//!     BindingView, CounterStore, ItemLike, LoreCache, LoreUpdater, MemoryBindingStore,
//!     PerfMonitor, Settings, SimpleItem, SystemClock, TokioExecutor,
//! };
//!
//! // Hosts bring their own BindingView; this one binds nothing.
//! struct NoBindings;
//! impl BindingView<SimpleItem> for NoBindings {
//!     fn is_bound(&self, _item: &SimpleItem) -> bool { false }
//!     fn bound_owner(&self, _item: &SimpleItem) -> Option<uuid::Uuid> { None }
//!     fn bind_lore_prefix(&self) -> String { "§7Owner: ".to_string() }
//! }
//!
//! let settings = Arc::new(Settings::default());
//! let bindings: Arc<dyn BindingView<SimpleItem>> = Arc::new(NoBindings);
//! let cache = LoreCache::new(settings.cache.clone(), Arc::new(SystemClock));
//! let display = Arc::new(LoreUpdater::new(
//!     Arc::clone(&settings),
//!     cache,
//!     Arc::new(PerfMonitor::new()),
//!     Arc::clone(&bindings),
//!     None,
//!     None,
//! ));
//! let counter = CounterStore::new(
//!     Arc::clone(&settings),
//!     bindings,
//!     Arc::new(MemoryBindingStore::new()),
//!     Arc::new(TokioExecutor),
//!     display,
//! );
//!
//! let mut item = SimpleItem::new("stone");
//! item.set_lore(vec![settings.display.marker_line.clone()]);
//! counter.set_use_times(&mut item, 10);
//! assert_eq!(counter.decrement_use_times(&mut item), 9);
//! ```

pub mod binding;
pub mod cache;
pub mod config;
pub mod counter;
pub mod display;
pub mod error;
pub mod item;
pub mod metrics;
pub mod runtime;

pub use binding::{
    BindingRecord, BindingStore, BindingView, FileBindingStore, MemoryBindingStore,
    sync_binding_uses,
};
pub use cache::{Clock, LoreCache, LoreKey, ManualClock, SystemClock};
pub use config::{CacheSettings, DisplaySettings, Settings};
pub use counter::{CounterStore, INFINITE_USES, UseCount};
pub use display::{
    BasicPlaceholders, LoreRenderer, LoreUpdater, OwnerProfile, OwnerResolver, PlaceholderEngine,
    RenderContext,
};
pub use error::Error;
pub use item::{ATTR_MAX_USES, ATTR_USES, ItemLike, SimpleItem};
pub use metrics::{PerfMonitor, PerfSnapshot};
pub use runtime::{TaskExecutor, TokioExecutor};
