// ABOUTME: JSON file catalog storage
// ABOUTME: Three independently keyed JSON blobs, one per collection, written via temp file + rename

use async_trait::async_trait;
use folio_core::{LabelKind, Project, CATEGORIES_FILE, PROJECTS_FILE, TAGS_FILE};
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error};

use super::{
    CatalogSnapshot, CatalogStorage, Changeset, StorageError, StorageInfo, StorageResult,
};

pub struct JsonFileStorage {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn projects_path(&self) -> PathBuf {
        self.dir.join(PROJECTS_FILE)
    }

    fn labels_path(&self, kind: LabelKind) -> PathBuf {
        match kind {
            LabelKind::Category => self.dir.join(CATEGORIES_FILE),
            LabelKind::Tag => self.dir.join(TAGS_FILE),
        }
    }

    async fn read_collection<T: DeserializeOwned + Default>(path: &Path) -> StorageResult<T> {
        match fs::read_to_string(path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                error!("Failed to parse {:?}: {}", path, e);
                StorageError::Json(e)
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn read_snapshot(&self) -> StorageResult<CatalogSnapshot> {
        let projects: Vec<Project> = Self::read_collection(&self.projects_path()).await?;
        let categories: BTreeSet<String> =
            Self::read_collection(&self.labels_path(LabelKind::Category)).await?;
        let tags: BTreeSet<String> =
            Self::read_collection(&self.labels_path(LabelKind::Tag)).await?;

        Ok(CatalogSnapshot {
            projects,
            categories,
            tags,
        })
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl CatalogStorage for JsonFileStorage {
    async fn initialize(&self) -> StorageResult<()> {
        if !self.dir.exists() {
            debug!("Creating data directory: {:?}", self.dir);
            fs::create_dir_all(&self.dir).await?;
        }
        Ok(())
    }

    async fn load(&self) -> StorageResult<CatalogSnapshot> {
        debug!("Reading catalog from: {:?}", self.dir);
        self.read_snapshot().await
    }

    async fn commit(&self, changes: Changeset) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        // Stage every changed collection first so a serialization or write
        // failure leaves all three files untouched. Label changes carry the
        // whole collection, so only the projects file is read back.
        let mut staged = Vec::new();
        if changes.touches_projects() {
            let mut snapshot = CatalogSnapshot {
                projects: Self::read_collection(&self.projects_path()).await?,
                ..Default::default()
            };
            snapshot.apply(&changes);
            staged.push((
                self.projects_path(),
                serde_json::to_string_pretty(&snapshot.projects)?,
            ));
        }
        for kind in [LabelKind::Category, LabelKind::Tag] {
            if let Some(labels) = changes.labels(kind) {
                staged.push((self.labels_path(kind), serde_json::to_string_pretty(labels)?));
            }
        }

        for (path, content) in &staged {
            fs::write(temp_path(path), content).await?;
        }

        let mut renamed = Vec::new();
        for (path, _) in &staged {
            if let Err(e) = fs::rename(temp_path(path), path).await {
                if renamed.is_empty() {
                    return Err(StorageError::Io(e));
                }
                error!(
                    "Catalog files left inconsistent: wrote {:?}, failed {:?}: {}",
                    renamed, path, e
                );
                return Err(StorageError::PartialCommit(format!(
                    "{} of {} collections written before failing on {}: {}",
                    renamed.len(),
                    staged.len(),
                    path.display(),
                    e
                )));
            }
            renamed.push(path.clone());
        }

        debug!("Wrote {} collection file(s) to {:?}", renamed.len(), self.dir);
        Ok(())
    }

    async fn get_storage_info(&self) -> StorageResult<StorageInfo> {
        let snapshot = self.read_snapshot().await?;
        Ok(StorageInfo::from_snapshot(
            "json",
            Some(self.dir.display().to_string()),
            &snapshot,
        ))
    }
}
