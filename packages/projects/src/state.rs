// ABOUTME: Shared application state for API handlers
// ABOUTME: Wraps the catalog manager together with request defaults

use folio_storage::{StorageConfig, StorageManager};
use std::sync::Arc;
use tracing::info;

use crate::manager::{CatalogManager, ManagerResult};
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Shared state for API handlers
#[derive(Clone)]
pub struct CatalogState {
    pub manager: Arc<CatalogManager>,
    /// Page size used when a showcase request does not name one
    pub page_size: usize,
}

impl CatalogState {
    pub fn new(manager: Arc<CatalogManager>) -> Self {
        Self {
            manager,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Open storage from configuration and load the catalog
    pub async fn init(config: StorageConfig) -> ManagerResult<Self> {
        let storage_manager = Arc::new(StorageManager::new(config).await?);
        let manager = CatalogManager::new(storage_manager).await?;
        info!("Catalog state initialized");
        Ok(Self::new(Arc::new(manager)))
    }

    /// State over process memory, mostly for tests
    pub async fn in_memory() -> ManagerResult<Self> {
        Ok(Self::new(Arc::new(CatalogManager::in_memory().await?)))
    }
}
