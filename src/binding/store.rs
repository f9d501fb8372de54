//! Binding store contract and record model.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One bound item instance as the external store sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BindingRecord {
    /// Store-assigned id of the bound item instance.
    pub id: String,

    /// Material / type name, matched against the item kind on sync.
    pub kind: String,

    /// Last persisted remaining-use count.
    pub uses: i32,

    /// When `uses` was last written.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl BindingRecord {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, uses: i32) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            uses,
            updated_at: Utc::now(),
        }
    }
}

/// Durable key/value-ish store of binding records, keyed by owner.
///
/// The core only ever upserts the `uses` field of existing records; record
/// creation and removal belong to the host's binding workflow.
#[async_trait]
pub trait BindingStore: Send + Sync + 'static {
    /// All records bound to `owner`. Unknown owners yield an empty list.
    async fn bindings_for(&self, owner: Uuid) -> anyhow::Result<Vec<BindingRecord>>;

    /// Overwrite the `uses` field of one record. Unknown ids are ignored.
    async fn set_uses(&self, owner: Uuid, binding_id: &str, uses: i32) -> anyhow::Result<()>;

    /// Flush pending changes to durable storage.
    async fn persist(&self) -> anyhow::Result<()>;
}
