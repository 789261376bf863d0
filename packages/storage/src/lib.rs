// ABOUTME: Data layer and persistence for Folio
// ABOUTME: Interchangeable catalog backends (memory, JSON files, SQLite) behind one trait

use async_trait::async_trait;
use folio_core::{LabelKind, Project};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

pub mod factory;
pub mod json;
pub mod memory;
pub mod sqlite;

pub use factory::{StorageFactory, StorageManager, StorageStats};
pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Invalid configuration format")]
    InvalidFormat,
    /// Some collections of a changeset were written and others were not
    #[error("Partial commit: {0}")]
    PartialCommit(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Full contents of the catalog: projects in insertion order, labels sorted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub projects: Vec<Project>,
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

impl CatalogSnapshot {
    pub fn labels(&self, kind: LabelKind) -> &BTreeSet<String> {
        match kind {
            LabelKind::Category => &self.categories,
            LabelKind::Tag => &self.tags,
        }
    }

    pub fn labels_mut(&mut self, kind: LabelKind) -> &mut BTreeSet<String> {
        match kind {
            LabelKind::Category => &mut self.categories,
            LabelKind::Tag => &mut self.tags,
        }
    }

    /// Apply a changeset in place. Upserted projects keep their position
    /// when they already exist and are appended otherwise.
    pub fn apply(&mut self, changes: &Changeset) {
        if !changes.removed_projects.is_empty() {
            self.projects
                .retain(|project| !changes.removed_projects.contains(&project.id));
        }

        for project in &changes.upserted_projects {
            match self.projects.iter_mut().find(|p| p.id == project.id) {
                Some(existing) => *existing = project.clone(),
                None => self.projects.push(project.clone()),
            }
        }

        if let Some(categories) = &changes.categories {
            self.categories = categories.clone();
        }
        if let Some(tags) = &changes.tags {
            self.tags = tags.clone();
        }
    }
}

/// A batch of writes that a backend must apply as one unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changeset {
    pub upserted_projects: Vec<Project>,
    pub removed_projects: Vec<String>,
    /// Full replacement of the category collection, when it changed
    pub categories: Option<BTreeSet<String>>,
    /// Full replacement of the tag collection, when it changed
    pub tags: Option<BTreeSet<String>>,
}

impl Changeset {
    pub fn is_empty(&self) -> bool {
        self.upserted_projects.is_empty()
            && self.removed_projects.is_empty()
            && self.categories.is_none()
            && self.tags.is_none()
    }

    pub fn touches_projects(&self) -> bool {
        !self.upserted_projects.is_empty() || !self.removed_projects.is_empty()
    }

    pub fn labels(&self, kind: LabelKind) -> Option<&BTreeSet<String>> {
        match kind {
            LabelKind::Category => self.categories.as_ref(),
            LabelKind::Tag => self.tags.as_ref(),
        }
    }

    pub fn set_labels(&mut self, kind: LabelKind, labels: BTreeSet<String>) {
        match kind {
            LabelKind::Category => self.categories = Some(labels),
            LabelKind::Tag => self.tags = Some(labels),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub enable_wal: bool,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Sqlite {
                path: folio_core::database_file(),
            },
            enable_wal: true,
            max_connections: 10,
            busy_timeout_seconds: 30,
        }
    }
}

impl StorageConfig {
    pub fn with_provider(provider: StorageProvider) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StorageProvider {
    /// Process memory only; nothing survives a restart
    Memory,
    /// Three JSON files, one per collection
    JsonFiles { dir: PathBuf },
    Sqlite { path: PathBuf },
}

/// Main storage trait that all catalog backends implement
#[cfg_attr(feature = "mocks", mockall::automock)]
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    async fn initialize(&self) -> StorageResult<()>;

    /// Read the whole catalog
    async fn load(&self) -> StorageResult<CatalogSnapshot>;

    /// Persist a changeset. After a successful return the next `load`
    /// reflects every write in it.
    async fn commit(&self, changes: Changeset) -> StorageResult<()>;

    async fn get_storage_info(&self) -> StorageResult<StorageInfo>;
}

/// Information about the storage system
#[derive(Debug, Clone, Serialize)]
pub struct StorageInfo {
    pub provider: String,
    pub location: Option<String>,
    pub total_projects: usize,
    pub total_categories: usize,
    pub total_tags: usize,
}

impl StorageInfo {
    pub fn from_snapshot(
        provider: impl Into<String>,
        location: Option<String>,
        snapshot: &CatalogSnapshot,
    ) -> Self {
        Self {
            provider: provider.into(),
            location,
            total_projects: snapshot.projects.len(),
            total_categories: snapshot.categories.len(),
            total_tags: snapshot.tags.len(),
        }
    }
}
