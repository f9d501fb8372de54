//! Binding layer - who owns which counted item, and where that lives.
//!
//! The read side ([`BindingView`]) classifies items and names their owner;
//! the durable side ([`BindingStore`]) holds per-owner records of bound
//! item instances. Decrements push the new count into the matching record
//! through a fire-and-forget job ([`sync_binding_uses`]).

mod file;
mod memory;
mod store;
mod sync;

pub use file::FileBindingStore;
pub use memory::MemoryBindingStore;
pub use store::{BindingRecord, BindingStore};
pub use sync::sync_binding_uses;

use uuid::Uuid;

use crate::item::ItemLike;

/// Read-side binding collaborator.
pub trait BindingView<I: ItemLike>: Send + Sync + 'static {
    /// Whether the item is bound to an owner at all.
    fn is_bound(&self, item: &I) -> bool;

    /// Owner of a bound item, if the binding carries one.
    fn bound_owner(&self, item: &I) -> Option<Uuid>;

    /// Prefix for the rendered bound-owner lore line.
    fn bind_lore_prefix(&self) -> String;
}
