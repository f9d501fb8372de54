//! JSON-file binding store.
//!
//! Persists the whole binding table as one JSON document, written atomically
//! through a temp file in the target directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::{BindingRecord, BindingStore};
use crate::error::Error;

#[derive(Debug, Default, Serialize, Deserialize)]
struct BindingDocument {
    #[serde(default)]
    bindings: HashMap<Uuid, Vec<BindingRecord>>,

    #[serde(default = "Utc::now")]
    saved_at: DateTime<Utc>,
}

/// File-backed store holding the binding table in memory and flushing it on
/// [`BindingStore::persist`].
pub struct FileBindingStore {
    path: PathBuf,
    table: RwLock<HashMap<Uuid, Vec<BindingRecord>>>,
}

impl FileBindingStore {
    /// Open a store at `path`, loading an existing document if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let table = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice::<BindingDocument>(&bytes)?.bindings,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        info!(
            "loaded bindings for {} owners from {}",
            table.len(),
            path.display()
        );
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Register a record under `owner`. Not durable until `persist`.
    pub fn put(&self, owner: Uuid, record: BindingRecord) {
        self.table.write().entry(owner).or_default().push(record);
    }

    fn write_atomic(&self, doc: &BindingDocument) -> Result<(), Error> {
        let dir = self.path.parent().unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, doc)?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl BindingStore for FileBindingStore {
    async fn bindings_for(&self, owner: Uuid) -> anyhow::Result<Vec<BindingRecord>> {
        Ok(self.table.read().get(&owner).cloned().unwrap_or_default())
    }

    async fn set_uses(&self, owner: Uuid, binding_id: &str, uses: i32) -> anyhow::Result<()> {
        let mut table = self.table.write();
        if let Some(records) = table.get_mut(&owner) {
            if let Some(record) = records.iter_mut().find(|r| r.id == binding_id) {
                record.uses = uses;
                record.updated_at = Utc::now();
                debug!(
                    "updated binding {} for owner {} to {} uses",
                    binding_id, owner, uses
                );
            }
        }
        Ok(())
    }

    async fn persist(&self) -> anyhow::Result<()> {
        let doc = BindingDocument {
            bindings: self.table.read().clone(),
            saved_at: Utc::now(),
        };
        self.write_atomic(&doc)?;
        debug!("persisted binding table to {}", self.path.display());
        Ok(())
    }
}
