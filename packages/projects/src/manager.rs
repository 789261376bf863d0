use chrono::Utc;
use folio_core::{
    generate_project_id, validate_label_name, validate_project_input, validate_stored_project,
    LabelKind, Project, ProjectInput, ValidationError,
};
use folio_storage::{CatalogSnapshot, StorageError, StorageManager};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::consistency::{self, CascadeReport, LabelUsage};
use crate::query::{self, Feed, ShowcasePage, ShowcaseQuery, ShowcaseSource};
use crate::store::Catalog;

/// Manager errors
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Validation errors: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: LabelKind, name: String },
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ManagerError {
    pub fn project_not_found(id: &str) -> Self {
        ManagerError::NotFound(format!("Project '{}'", id))
    }

    pub fn label_not_found(kind: LabelKind, name: &str) -> Self {
        ManagerError::NotFound(format!("{} '{}'", kind, name))
    }

    /// True when storage wrote part of a changeset before failing
    pub fn is_partial_commit(&self) -> bool {
        matches!(self, ManagerError::Storage(StorageError::PartialCommit(_)))
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Counts after an import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub projects: usize,
    pub categories: usize,
    pub tags: usize,
}

/// Labels referenced by `input` that are missing from the catalog
fn check_references(catalog: &Catalog, input: &ProjectInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for kind in [LabelKind::Category, LabelKind::Tag] {
        let labels = match kind {
            LabelKind::Category => &input.categories,
            LabelKind::Tag => &input.tags,
        };
        for name in labels {
            if !catalog.contains_label(kind, name) {
                errors.push(ValidationError::new(
                    kind.collection(),
                    format!("Unknown {} '{}'", kind.to_string().to_lowercase(), name),
                ));
            }
        }
    }
    errors
}

fn validate_with_references(catalog: &Catalog, input: &ProjectInput) -> ManagerResult<()> {
    let mut errors = validate_project_input(input);
    if errors.is_empty() {
        errors = check_references(catalog, input);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ManagerError::Validation(errors))
    }
}

/// Every imported record must pass the create rules (empty label lists
/// aside, which cascades can produce), ids must be present and distinct, and
/// label names must be non-blank.
fn validate_import(snapshot: &CatalogSnapshot) -> ManagerResult<()> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, project) in snapshot.projects.iter().enumerate() {
        let prefix = format!("projects[{}]", index);
        if project.id.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{}.id", prefix),
                "Project id is required",
            ));
        } else if !seen.insert(project.id.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.id", prefix),
                format!("Duplicate project id '{}'", project.id),
            ));
        }

        for error in validate_stored_project(&ProjectInput::from(project)) {
            errors.push(ValidationError::new(
                format!("{}.{}", prefix, error.field),
                error.message,
            ));
        }
    }

    for kind in [LabelKind::Category, LabelKind::Tag] {
        for name in snapshot.labels(kind) {
            for error in validate_label_name(name) {
                errors.push(ValidationError::new(kind.collection(), error.message));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ManagerError::Validation(errors))
    }
}

fn unique_project_id(catalog: &Catalog) -> String {
    loop {
        let id = generate_project_id();
        if !catalog.contains_project(&id) {
            return id;
        }
    }
}

/// Owns the catalog and applies every mutation as a staged commit:
/// the change is made on a copy, persisted as one changeset, and only then
/// swapped in. A failed commit leaves the visible state untouched.
pub struct CatalogManager {
    storage_manager: Arc<StorageManager>,
    catalog: RwLock<Catalog>,
    write_lock: Mutex<()>,
}

impl CatalogManager {
    /// Load the catalog from the given storage
    pub async fn new(storage_manager: Arc<StorageManager>) -> ManagerResult<Self> {
        let snapshot = storage_manager.storage().load().await?;
        info!(
            "Loaded catalog with {} projects, {} categories, {} tags",
            snapshot.projects.len(),
            snapshot.categories.len(),
            snapshot.tags.len()
        );

        Ok(Self {
            storage_manager,
            catalog: RwLock::new(Catalog::from_snapshot(snapshot)),
            write_lock: Mutex::new(()),
        })
    }

    /// Manager over process memory, mostly for tests
    pub async fn in_memory() -> ManagerResult<Self> {
        Self::new(Arc::new(StorageManager::in_memory())).await
    }

    pub fn storage_manager(&self) -> Arc<StorageManager> {
        self.storage_manager.clone()
    }

    /// Replace in-memory state with what storage currently holds
    pub async fn reload(&self) -> ManagerResult<()> {
        let _guard = self.write_lock.lock().await;
        self.reload_locked().await
    }

    async fn reload_locked(&self) -> ManagerResult<()> {
        let snapshot = self.storage_manager.storage().load().await?;
        *self.catalog.write().await = Catalog::from_snapshot(snapshot);
        debug!("Reloaded catalog from storage");
        Ok(())
    }

    async fn mutate<T, F>(&self, op: F) -> ManagerResult<T>
    where
        F: FnOnce(&mut Catalog) -> ManagerResult<T>,
    {
        let _guard = self.write_lock.lock().await;

        let mut staged = self.catalog.read().await.clone();
        let output = op(&mut staged)?;

        let changes = staged.take_changes();
        if changes.is_empty() {
            return Ok(output);
        }

        if let Err(e) = self.storage_manager.storage().commit(changes).await {
            if let StorageError::PartialCommit(detail) = &e {
                error!("Catalog partially persisted, reloading from storage: {}", detail);
                if let Err(reload_err) = self.reload_locked().await {
                    error!("Failed to reload catalog after partial commit: {}", reload_err);
                }
            } else {
                error!("Failed to persist catalog changes: {}", e);
            }
            return Err(e.into());
        }

        *self.catalog.write().await = staged;
        Ok(output)
    }

    // Projects

    pub async fn list_projects(&self) -> Vec<Project> {
        self.catalog.read().await.list_projects().to_vec()
    }

    pub async fn search_projects(&self, term: &str) -> Vec<Project> {
        query::search_projects(self.catalog.read().await.list_projects(), term)
    }

    pub async fn get_project(&self, id: &str) -> ManagerResult<Project> {
        self.catalog
            .read()
            .await
            .get_project(id)
            .cloned()
            .ok_or_else(|| ManagerError::project_not_found(id))
    }

    pub async fn create_project(&self, input: ProjectInput) -> ManagerResult<Project> {
        let project = self
            .mutate(|catalog| {
                validate_with_references(catalog, &input)?;
                let project = Project::from_input(unique_project_id(catalog), input, Utc::now());
                catalog.put_project(project.clone());
                Ok(project)
            })
            .await?;

        info!("Created project '{}' with ID {}", project.title, project.id);
        Ok(project)
    }

    /// Full replace of every editable field
    pub async fn update_project(&self, id: &str, input: ProjectInput) -> ManagerResult<Project> {
        let project = self
            .mutate(|catalog| {
                let mut project = catalog
                    .get_project(id)
                    .cloned()
                    .ok_or_else(|| ManagerError::project_not_found(id))?;
                validate_with_references(catalog, &input)?;
                project.replace_with(input, Utc::now());
                catalog.put_project(project.clone());
                Ok(project)
            })
            .await?;

        info!("Updated project '{}' (ID: {})", project.title, project.id);
        Ok(project)
    }

    pub async fn delete_project(&self, id: &str) -> ManagerResult<Project> {
        let project = self
            .mutate(|catalog| {
                catalog
                    .remove_project(id)
                    .ok_or_else(|| ManagerError::project_not_found(id))
            })
            .await?;

        info!("Deleted project '{}' (ID: {})", project.title, project.id);
        Ok(project)
    }

    // Labels

    pub async fn list_labels(&self, kind: LabelKind) -> Vec<String> {
        self.catalog
            .read()
            .await
            .list_labels(kind)
            .iter()
            .cloned()
            .collect()
    }

    /// Labels with usage counts, optionally narrowed by a search term
    pub async fn label_usage(&self, kind: LabelKind, search: Option<&str>) -> Vec<LabelUsage> {
        let catalog = self.catalog.read().await;
        let usage = consistency::label_usage(&catalog, kind);
        match search {
            Some(term) => {
                let names: Vec<String> = usage.iter().map(|u| u.name.clone()).collect();
                let keep = query::search_labels(&names, term);
                usage.into_iter().filter(|u| keep.contains(&u.name)).collect()
            }
            None => usage,
        }
    }

    pub async fn usage_count(&self, kind: LabelKind, name: &str) -> ManagerResult<usize> {
        let catalog = self.catalog.read().await;
        if !catalog.contains_label(kind, name) {
            return Err(ManagerError::label_not_found(kind, name));
        }
        Ok(consistency::usage_count(catalog.list_projects(), kind, name))
    }

    pub async fn add_label(&self, kind: LabelKind, name: &str) -> ManagerResult<()> {
        self.mutate(|catalog| consistency::add_label(catalog, kind, name))
            .await?;
        info!("Added {} '{}'", kind, name);
        Ok(())
    }

    pub async fn rename_label(
        &self,
        kind: LabelKind,
        old_name: &str,
        new_name: &str,
    ) -> ManagerResult<CascadeReport> {
        let report = self
            .mutate(|catalog| consistency::rename_label(catalog, kind, old_name, new_name))
            .await?;

        info!(
            "Renamed {} '{}' to '{}' ({} projects updated)",
            kind,
            old_name,
            new_name,
            report.affected_projects.len()
        );
        Ok(report)
    }

    pub async fn delete_label(&self, kind: LabelKind, name: &str) -> ManagerResult<CascadeReport> {
        let report = self
            .mutate(|catalog| consistency::delete_label(catalog, kind, name))
            .await?;

        info!(
            "Deleted {} '{}' (was used by {} projects)",
            kind, name, report.usage_count
        );
        Ok(report)
    }

    // Queries

    pub async fn showcase(&self, source: ShowcaseSource, query: &ShowcaseQuery) -> ShowcasePage {
        let items = source.select(self.catalog.read().await.list_projects());
        query::showcase(&items, query)
    }

    /// Categories referenced by the items of `source`
    pub async fn available_categories(&self, source: ShowcaseSource) -> Vec<String> {
        let items = source.select(self.catalog.read().await.list_projects());
        query::available_categories(&items)
    }

    /// A load-more feed over the current items of `source`
    pub async fn feed(&self, source: ShowcaseSource, page_size: usize) -> Feed {
        let items = source.select(self.catalog.read().await.list_projects());
        Feed::new(items, page_size)
    }

    // Export / import

    pub async fn export(&self) -> CatalogSnapshot {
        self.catalog.read().await.to_snapshot()
    }

    /// Replace the whole catalog. Labels referenced by imported projects are
    /// added to their collections when missing.
    pub async fn import(&self, snapshot: CatalogSnapshot) -> ManagerResult<ImportSummary> {
        validate_import(&snapshot)?;
        let derived = Catalog::from_projects(snapshot.projects.clone());
        let summary = self
            .mutate(|catalog| {
                let existing: Vec<String> =
                    catalog.list_projects().iter().map(|p| p.id.clone()).collect();
                for id in existing {
                    catalog.remove_project(&id);
                }
                for kind in [LabelKind::Category, LabelKind::Tag] {
                    let names: Vec<String> = catalog.list_labels(kind).iter().cloned().collect();
                    for name in names {
                        catalog.remove_label(kind, &name);
                    }
                }

                for kind in [LabelKind::Category, LabelKind::Tag] {
                    for name in snapshot.labels(kind).iter().chain(derived.list_labels(kind)) {
                        catalog.put_label(kind, name);
                    }
                }
                for project in derived.list_projects() {
                    catalog.put_project(project.clone());
                }

                Ok(ImportSummary {
                    projects: catalog.list_projects().len(),
                    categories: catalog.list_labels(LabelKind::Category).len(),
                    tags: catalog.list_labels(LabelKind::Tag).len(),
                })
            })
            .await?;

        info!(
            "Imported {} projects, {} categories, {} tags",
            summary.projects, summary.categories, summary.tags
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::input;
    use folio_storage::{
        CatalogStorage, MemoryStorage, MockCatalogStorage, StorageConfig, StorageProvider,
    };
    use pretty_assertions::assert_eq;

    async fn seeded_manager() -> CatalogManager {
        let manager = CatalogManager::in_memory().await.unwrap();
        for name in ["Web App", "AI/ML"] {
            manager.add_label(LabelKind::Category, name).await.unwrap();
        }
        for name in ["React", "Vue"] {
            manager.add_label(LabelKind::Tag, name).await.unwrap();
        }
        manager
    }

    #[tokio::test]
    async fn test_create_and_get_project() {
        let manager = seeded_manager().await;

        let project = manager
            .create_project(input("Portfolio", &["Web App"], &["React"]))
            .await
            .unwrap();

        assert_eq!(project.id.len(), 8);
        assert_eq!(project.created_at, project.updated_at);
        let fetched = manager.get_project(&project.id).await.unwrap();
        assert_eq!(fetched, project);

        let stored = manager.storage_manager().storage().load().await.unwrap();
        assert_eq!(stored.projects, vec![project]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_and_unknown_labels() {
        let manager = seeded_manager().await;

        let mut bad = input("", &["Web App"], &["React"]);
        bad.demo_url = "nope".to_string();
        match manager.create_project(bad).await {
            Err(ManagerError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }

        match manager
            .create_project(input("Site", &["Games"], &["React", "Svelte"]))
            .await
        {
            Err(ManagerError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["categories", "tags"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        assert!(manager.list_projects().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let manager = seeded_manager().await;
        let created = manager
            .create_project(input("Portfolio", &["Web App"], &["React"]))
            .await
            .unwrap();

        let mut replacement = input("Portfolio v2", &["AI/ML"], &["Vue"]);
        replacement.featured = true;
        let updated = manager
            .update_project(&created.id, replacement)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.categories, vec!["AI/ML"]);
        assert!(updated.featured);

        let missing = manager
            .update_project("missing1", input("X", &["AI/ML"], &["Vue"]))
            .await;
        assert!(matches!(missing, Err(ManagerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_project() {
        let manager = seeded_manager().await;
        let created = manager
            .create_project(input("Portfolio", &["Web App"], &["React"]))
            .await
            .unwrap();

        let deleted = manager.delete_project(&created.id).await.unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(manager.list_projects().await.is_empty());
        assert_eq!(manager.list_labels(LabelKind::Tag).await, vec!["React", "Vue"]);

        let again = manager.delete_project(&created.id).await;
        assert!(matches!(again, Err(ManagerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rename_cascade_is_persisted() {
        let manager = seeded_manager().await;
        let p1 = manager
            .create_project(input("Site", &["Web App"], &["React"]))
            .await
            .unwrap();

        manager
            .rename_label(LabelKind::Category, "Web App", "Webapp")
            .await
            .unwrap();

        assert_eq!(
            manager.list_labels(LabelKind::Category).await,
            vec!["AI/ML", "Webapp"]
        );
        let stored = manager.storage_manager().storage().load().await.unwrap();
        assert_eq!(stored.projects[0].id, p1.id);
        assert_eq!(stored.projects[0].categories, vec!["Webapp"]);
        assert!(stored.categories.contains("Webapp"));
        assert!(!stored.categories.contains("Web App"));
    }

    #[tokio::test]
    async fn test_delete_tag_with_usage() {
        let manager = seeded_manager().await;
        manager
            .create_project(input("One", &["Web App"], &["React", "Vue"]))
            .await
            .unwrap();
        manager
            .create_project(input("Two", &["AI/ML"], &["React"]))
            .await
            .unwrap();

        assert_eq!(manager.usage_count(LabelKind::Tag, "React").await.unwrap(), 2);
        let report = manager.delete_label(LabelKind::Tag, "React").await.unwrap();

        assert_eq!(report.usage_count, 2);
        assert_eq!(report.emptied_projects.len(), 1);
        for project in manager.list_projects().await {
            assert!(!project.tags.contains(&"React".to_string()));
        }
        assert!(matches!(
            manager.usage_count(LabelKind::Tag, "React").await,
            Err(ManagerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_label_usage_search() {
        let manager = seeded_manager().await;
        manager
            .create_project(input("One", &["AI/ML"], &["React"]))
            .await
            .unwrap();

        let usage = manager.label_usage(LabelKind::Category, Some("ai")).await;
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].name, "AI/ML");
        assert_eq!(usage[0].usage_count, 1);
        assert_eq!(manager.label_usage(LabelKind::Category, None).await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_commit_leaves_state_unchanged() {
        let seed = CatalogSnapshot {
            categories: ["Web App".to_string()].into(),
            ..Default::default()
        };

        let mut mock = MockCatalogStorage::new();
        mock.expect_load().returning(move || Ok(seed.clone()));
        mock.expect_commit()
            .returning(|_| Err(StorageError::Database("disk full".to_string())));

        let storage_manager = StorageManager::from_storage(
            Box::new(mock),
            StorageConfig::with_provider(StorageProvider::Memory),
        );
        let manager = CatalogManager::new(Arc::new(storage_manager)).await.unwrap();

        let result = manager
            .rename_label(LabelKind::Category, "Web App", "Webapp")
            .await;
        assert!(matches!(result, Err(ManagerError::Storage(_))));
        assert_eq!(manager.list_labels(LabelKind::Category).await, vec!["Web App"]);
    }

    #[tokio::test]
    async fn test_partial_commit_reloads_from_storage() {
        let mut persisted = CatalogSnapshot::default();
        persisted.tags.insert("Rust".to_string());
        let reloaded = persisted.clone();

        let mut mock = MockCatalogStorage::new();
        let mut loads = 0;
        mock.expect_load().returning(move || {
            loads += 1;
            if loads == 1 {
                Ok(CatalogSnapshot::default())
            } else {
                Ok(reloaded.clone())
            }
        });
        mock.expect_commit()
            .returning(|_| Err(StorageError::PartialCommit("1 of 2".to_string())));

        let storage_manager = StorageManager::from_storage(
            Box::new(mock),
            StorageConfig::with_provider(StorageProvider::Memory),
        );
        let manager = CatalogManager::new(Arc::new(storage_manager)).await.unwrap();

        let err = manager.add_label(LabelKind::Tag, "Rust").await.unwrap_err();
        assert!(err.is_partial_commit());
        assert_eq!(manager.list_labels(LabelKind::Tag).await, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_idempotent_rename_skips_storage() {
        let mut mock = MockCatalogStorage::new();
        mock.expect_load().returning(|| {
            Ok(CatalogSnapshot {
                tags: ["React".to_string()].into(),
                ..Default::default()
            })
        });
        mock.expect_commit().never();

        let storage_manager = StorageManager::from_storage(
            Box::new(mock),
            StorageConfig::with_provider(StorageProvider::Memory),
        );
        let manager = CatalogManager::new(Arc::new(storage_manager)).await.unwrap();

        let report = manager
            .rename_label(LabelKind::Tag, "React", "React")
            .await
            .unwrap();
        assert!(report.affected_projects.is_empty());
    }

    #[tokio::test]
    async fn test_export_import_round_trip() {
        let manager = seeded_manager().await;
        manager
            .create_project(input("One", &["Web App"], &["React"]))
            .await
            .unwrap();
        let exported = manager.export().await;

        let target = CatalogManager::new(Arc::new(StorageManager::from_storage(
            Box::new(MemoryStorage::new()),
            StorageConfig::with_provider(StorageProvider::Memory),
        )))
        .await
        .unwrap();
        target.add_label(LabelKind::Tag, "Stale").await.unwrap();

        let summary = target.import(exported.clone()).await.unwrap();
        assert_eq!(summary.projects, 1);
        assert_eq!(summary.categories, 2);
        assert_eq!(summary.tags, 2);
        assert_eq!(target.export().await, exported);
    }

    #[tokio::test]
    async fn test_import_derives_missing_labels() {
        let manager = CatalogManager::in_memory().await.unwrap();
        let source = seeded_manager().await;
        source
            .create_project(input("One", &["Web App"], &["React"]))
            .await
            .unwrap();

        let mut snapshot = source.export().await;
        snapshot.categories.clear();
        snapshot.tags.clear();

        let summary = manager.import(snapshot).await.unwrap();
        assert_eq!(summary.categories, 1);
        assert_eq!(manager.list_labels(LabelKind::Tag).await, vec!["React"]);
    }

    #[tokio::test]
    async fn test_import_rejects_invalid_records() {
        let manager = seeded_manager().await;
        let before = manager.export().await;

        let mut bad = crate::test_utils::project("x1", "", &["Web App", " "], &["Rust", "Rust"]);
        bad.image = "not a url".to_string();
        let snapshot = CatalogSnapshot {
            projects: vec![bad],
            ..Default::default()
        };

        match manager.import(snapshot).await {
            Err(ManagerError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert!(fields.contains(&"projects[0].title"));
                assert!(fields.contains(&"projects[0].image"));
                assert!(fields.contains(&"projects[0].categories"));
                assert!(fields.contains(&"projects[0].tags"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(manager.export().await, before);
    }

    #[tokio::test]
    async fn test_import_rejects_duplicate_ids() {
        let manager = seeded_manager().await;
        let before = manager.export().await;

        let snapshot = CatalogSnapshot {
            projects: vec![
                crate::test_utils::project("dup", "First", &["Web App"], &["React"]),
                crate::test_utils::project("dup", "Second", &["Web App"], &["React"]),
            ],
            ..Default::default()
        };

        match manager.import(snapshot).await {
            Err(ManagerError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "projects[1].id");
                assert!(errors[0].message.contains("dup"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(manager.export().await, before);
    }

    #[tokio::test]
    async fn test_import_accepts_projects_emptied_by_cascade() {
        let manager = seeded_manager().await;
        let project = manager
            .create_project(input("Solo", &["Web App"], &["Vue"]))
            .await
            .unwrap();
        manager.delete_label(LabelKind::Tag, "Vue").await.unwrap();
        let exported = manager.export().await;
        assert!(exported.projects[0].tags.is_empty());

        let target = CatalogManager::in_memory().await.unwrap();
        target.import(exported.clone()).await.unwrap();
        assert_eq!(target.get_project(&project.id).await.unwrap().tags.len(), 0);
        assert_eq!(target.export().await, exported);
    }

    #[tokio::test]
    async fn test_import_rejects_blank_label_names() {
        let manager = CatalogManager::in_memory().await.unwrap();
        let mut snapshot = CatalogSnapshot::default();
        snapshot.tags.insert("  ".to_string());

        assert!(matches!(
            manager.import(snapshot).await,
            Err(ManagerError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_showcase_and_feed_by_source() {
        let manager = seeded_manager().await;
        let mut pen = input("Pen", &["Web App"], &["Vue"]);
        pen.embed = folio_core::Embed::Codepen("https://codepen.io/a/pen/b".to_string());
        manager.create_project(pen).await.unwrap();
        manager
            .create_project(input("Site", &["AI/ML"], &["React"]))
            .await
            .unwrap();

        let page = manager
            .showcase(ShowcaseSource::Codepens, &ShowcaseQuery::default())
            .await;
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Pen");

        assert_eq!(
            manager.available_categories(ShowcaseSource::Projects).await,
            vec!["AI/ML", "Web App"]
        );

        let feed = manager.feed(ShowcaseSource::Projects, 1).await;
        assert_eq!(feed.visible().len(), 1);
        assert!(feed.has_more());
    }
}
