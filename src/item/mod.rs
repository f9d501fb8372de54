//! Item abstraction.
//!
//! The core never talks to a game engine directly; it mutates anything
//! implementing [`ItemLike`], which exposes the two counter attributes and
//! the lore line list. Engine adapters implement the trait for their own
//! item type; [`SimpleItem`] is the in-memory reference implementation used
//! by tests and standalone tools.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attribute key for the current remaining uses.
pub const ATTR_USES: &str = "usebound:uses";

/// Attribute key for the use ceiling.
pub const ATTR_MAX_USES: &str = "usebound:max_uses";

/// An item-like value carrying typed integer attributes and lore lines.
///
/// Items without a metadata container turn every write into a silent no-op;
/// an absent attribute is distinct from one stored as 0. `Clone` exists so
/// background persistence can work on a value snapshot of the item.
pub trait ItemLike: Clone + Send + Sync + 'static {
    /// Material / type identifier. Part of the lore cache key and the
    /// binding record match.
    fn kind(&self) -> &str;

    /// Whether the item carries a metadata container at all.
    fn has_meta(&self) -> bool;

    /// Read a typed integer attribute.
    fn attr(&self, key: &str) -> Option<i32>;

    /// Write a typed integer attribute.
    ///
    /// Returns `false` (and does nothing) when the item has no metadata
    /// container.
    fn set_attr(&mut self, key: &str, value: i32) -> bool;

    /// Current lore lines, if the item carries any.
    fn lore(&self) -> Option<&[String]>;

    /// Replace the lore lines.
    ///
    /// Returns `false` when the item has no metadata container.
    fn set_lore(&mut self, lines: Vec<String>) -> bool;
}

/// In-memory [`ItemLike`] implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleItem {
    kind: String,
    meta: Option<SimpleMeta>,
}

/// Metadata container backing [`SimpleItem`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleMeta {
    #[serde(default)]
    attrs: HashMap<String, i32>,
    #[serde(default)]
    lore: Vec<String>,
}

impl SimpleItem {
    /// An item of `kind` with an empty metadata container.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            meta: Some(SimpleMeta::default()),
        }
    }

    /// An item without a metadata container; every core write no-ops on it.
    pub fn bare(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            meta: None,
        }
    }
}

impl ItemLike for SimpleItem {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    fn attr(&self, key: &str) -> Option<i32> {
        self.meta.as_ref().and_then(|m| m.attrs.get(key).copied())
    }

    fn set_attr(&mut self, key: &str, value: i32) -> bool {
        match &mut self.meta {
            Some(meta) => {
                meta.attrs.insert(key.to_string(), value);
                true
            }
            None => false,
        }
    }

    fn lore(&self) -> Option<&[String]> {
        self.meta.as_ref().map(|m| m.lore.as_slice())
    }

    fn set_lore(&mut self, lines: Vec<String>) -> bool {
        match &mut self.meta {
            Some(meta) => {
                meta.lore = lines;
                true
            }
            None => false,
        }
    }
}
