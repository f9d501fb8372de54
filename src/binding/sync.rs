//! Fire-and-forget synchronization of decremented counts.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use super::BindingStore;
use crate::item::ItemLike;

/// Push `uses` into the owner's binding record matching the snapshot's kind.
///
/// Runs on a value snapshot taken at schedule time; the live item may have
/// mutated again by the time this executes. No matching record is not an
/// error: the binding may have been released in the meantime.
pub async fn sync_binding_uses<I: ItemLike>(
    store: Arc<dyn BindingStore>,
    owner: Uuid,
    snapshot: I,
    uses: i32,
) -> anyhow::Result<()> {
    let records = store.bindings_for(owner).await?;
    let Some(record) = records.iter().find(|r| r.kind == snapshot.kind()) else {
        debug!(
            "no binding for owner {} matching kind {}",
            owner,
            snapshot.kind()
        );
        return Ok(());
    };
    store.set_uses(owner, &record.id, uses).await?;
    store.persist().await?;
    Ok(())
}
