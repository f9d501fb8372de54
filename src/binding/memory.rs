//! In-memory binding store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::{BindingRecord, BindingStore};

/// Process-local store for tests and single-process hosts.
///
/// `persist` is a no-op; the table lives and dies with the process.
#[derive(Debug, Default)]
pub struct MemoryBindingStore {
    records: DashMap<Uuid, Vec<BindingRecord>>,
}

impl MemoryBindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record under `owner`.
    pub fn put(&self, owner: Uuid, record: BindingRecord) {
        self.records.entry(owner).or_default().push(record);
    }
}

#[async_trait]
impl BindingStore for MemoryBindingStore {
    async fn bindings_for(&self, owner: Uuid) -> anyhow::Result<Vec<BindingRecord>> {
        Ok(self
            .records
            .get(&owner)
            .map(|r| r.clone())
            .unwrap_or_default())
    }

    async fn set_uses(&self, owner: Uuid, binding_id: &str, uses: i32) -> anyhow::Result<()> {
        if let Some(mut records) = self.records.get_mut(&owner) {
            if let Some(record) = records.iter_mut().find(|r| r.id == binding_id) {
                record.uses = uses;
                record.updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn persist(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_uses_touches_only_the_named_record() {
        let store = MemoryBindingStore::new();
        let owner = Uuid::from_u128(7);
        store.put(owner, BindingRecord::new("b1", "stone", 10));
        store.put(owner, BindingRecord::new("b2", "oak_log", 10));

        store.set_uses(owner, "b2", 3).await.unwrap();

        let records = store.bindings_for(owner).await.unwrap();
        assert_eq!(records.iter().find(|r| r.id == "b1").unwrap().uses, 10);
        assert_eq!(records.iter().find(|r| r.id == "b2").unwrap().uses, 3);
    }

    #[tokio::test]
    async fn unknown_owner_yields_empty_and_ignores_writes() {
        let store = MemoryBindingStore::new();
        let owner = Uuid::from_u128(9);

        assert!(store.bindings_for(owner).await.unwrap().is_empty());
        store.set_uses(owner, "b1", 1).await.unwrap();
        assert!(store.bindings_for(owner).await.unwrap().is_empty());
    }
}
