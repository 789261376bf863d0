// ABOUTME: In-process catalog storage
// ABOUTME: Holds the snapshot behind a lock; commits swap state in one step

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CatalogSnapshot, CatalogStorage, Changeset, StorageInfo, StorageResult};

#[derive(Default)]
pub struct MemoryStorage {
    state: RwLock<CatalogSnapshot>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStorage for MemoryStorage {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn load(&self) -> StorageResult<CatalogSnapshot> {
        Ok(self.state.read().await.clone())
    }

    async fn commit(&self, changes: Changeset) -> StorageResult<()> {
        debug!(
            "Committing {} upserts and {} removals to memory",
            changes.upserted_projects.len(),
            changes.removed_projects.len()
        );
        self.state.write().await.apply(&changes);
        Ok(())
    }

    async fn get_storage_info(&self) -> StorageResult<StorageInfo> {
        let state = self.state.read().await;
        Ok(StorageInfo::from_snapshot("memory", None, &state))
    }
}
