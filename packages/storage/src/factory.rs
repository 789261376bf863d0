use std::sync::Arc;
use tracing::{debug, info};

use super::{
    json::JsonFileStorage, memory::MemoryStorage, sqlite::SqliteStorage, CatalogStorage,
    StorageConfig, StorageProvider, StorageResult,
};

/// Factory for creating storage instances
pub struct StorageFactory;

impl StorageFactory {
    /// Create and initialize a storage instance from configuration
    pub async fn create_storage(config: StorageConfig) -> StorageResult<Box<dyn CatalogStorage>> {
        debug!("Creating storage with provider: {:?}", config.provider);

        let storage: Box<dyn CatalogStorage> = match &config.provider {
            StorageProvider::Memory => {
                info!("Using in-memory storage");
                Box::new(MemoryStorage::new())
            }
            StorageProvider::JsonFiles { dir } => {
                info!("Initializing JSON file storage at: {:?}", dir);
                Box::new(JsonFileStorage::new(dir.clone()))
            }
            StorageProvider::Sqlite { path } => {
                info!("Initializing SQLite storage at: {:?}", path);
                Box::new(SqliteStorage::new(config.clone()).await?)
            }
        };

        storage.initialize().await?;
        Ok(storage)
    }
}

/// Storage manager that holds the active storage instance
pub struct StorageManager {
    storage: Arc<Box<dyn CatalogStorage>>,
    config: StorageConfig,
}

impl StorageManager {
    /// Create a new storage manager with the given configuration
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        let storage = Arc::new(StorageFactory::create_storage(config.clone()).await?);
        Ok(Self { storage, config })
    }

    /// Wrap an already initialized backend
    pub fn from_storage(storage: Box<dyn CatalogStorage>, config: StorageConfig) -> Self {
        Self {
            storage: Arc::new(storage),
            config,
        }
    }

    /// Process-local storage, mostly for tests
    pub fn in_memory() -> Self {
        Self::from_storage(
            Box::new(MemoryStorage::new()),
            StorageConfig::with_provider(StorageProvider::Memory),
        )
    }

    /// Get a reference to the storage instance
    pub fn storage(&self) -> Arc<Box<dyn CatalogStorage>> {
        self.storage.clone()
    }

    /// Get the current configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Test the storage connection
    pub async fn test_connection(&self) -> StorageResult<()> {
        debug!("Testing storage connection");
        let _info = self.storage.get_storage_info().await?;
        info!("Storage connection test successful");
        Ok(())
    }

    /// Get storage statistics
    pub async fn get_stats(&self) -> StorageResult<StorageStats> {
        let info = self.storage.get_storage_info().await?;
        let snapshot = self.storage.load().await?;

        let featured_projects = snapshot.projects.iter().filter(|p| p.featured).count();
        let codepen_projects = snapshot
            .projects
            .iter()
            .filter(|p| p.embed.is_codepen())
            .count();

        Ok(StorageStats {
            total_projects: info.total_projects,
            featured_projects,
            codepen_projects,
            total_categories: info.total_categories,
            total_tags: info.total_tags,
            provider: info.provider,
            location: info.location,
        })
    }
}

/// Statistics about the storage system
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub total_projects: usize,
    pub featured_projects: usize,
    pub codepen_projects: usize,
    pub total_categories: usize,
    pub total_tags: usize,
    pub provider: String,
    pub location: Option<String>,
}
