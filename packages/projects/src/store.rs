// ABOUTME: In-memory entity store for projects, categories and tags
// ABOUTME: Records every primitive write so a batch can be committed as one changeset

use folio_core::{LabelKind, Project};
use folio_storage::{CatalogSnapshot, Changeset};
use std::collections::BTreeSet;

/// Canonical collections plus the writes made since the last `take_changes`.
///
/// Holds no business rules: uniqueness and cascades live in `consistency`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<Project>,
    categories: BTreeSet<String>,
    tags: BTreeSet<String>,
    dirty_projects: Vec<String>,
    removed_projects: Vec<String>,
    dirty_categories: bool,
    dirty_tags: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            projects: snapshot.projects,
            categories: snapshot.categories,
            tags: snapshot.tags,
            ..Self::default()
        }
    }

    /// Build a catalog from bare projects, deriving both label collections
    /// from what the projects reference.
    pub fn from_projects(projects: Vec<Project>) -> Self {
        let mut catalog = Self::default();
        for project in projects {
            for kind in [LabelKind::Category, LabelKind::Tag] {
                for name in project.labels(kind) {
                    catalog.labels_mut(kind).insert(name.clone());
                }
            }
            catalog.projects.push(project);
        }
        catalog
    }

    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            projects: self.projects.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Projects in insertion order
    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    /// Label names, sorted ascending (case-sensitive)
    pub fn list_labels(&self, kind: LabelKind) -> &BTreeSet<String> {
        match kind {
            LabelKind::Category => &self.categories,
            LabelKind::Tag => &self.tags,
        }
    }

    fn labels_mut(&mut self, kind: LabelKind) -> &mut BTreeSet<String> {
        match kind {
            LabelKind::Category => &mut self.categories,
            LabelKind::Tag => &mut self.tags,
        }
    }

    fn mark_labels_dirty(&mut self, kind: LabelKind) {
        match kind {
            LabelKind::Category => self.dirty_categories = true,
            LabelKind::Tag => self.dirty_tags = true,
        }
    }

    pub fn get_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn contains_project(&self, id: &str) -> bool {
        self.get_project(id).is_some()
    }

    pub fn contains_label(&self, kind: LabelKind, name: &str) -> bool {
        self.list_labels(kind).contains(name)
    }

    /// Insert or replace a project. Replacements keep their position.
    ///
    /// A project removed and put back in the same batch stays in the removal
    /// list so backends also move it to the end.
    pub fn put_project(&mut self, project: Project) {
        let id = project.id.clone();
        match self.projects.iter_mut().find(|p| p.id == id) {
            Some(existing) => *existing = project,
            None => self.projects.push(project),
        }

        if !self.dirty_projects.contains(&id) {
            self.dirty_projects.push(id);
        }
    }

    pub fn remove_project(&mut self, id: &str) -> Option<Project> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        let project = self.projects.remove(index);

        self.dirty_projects.retain(|dirty| dirty != id);
        self.removed_projects.push(id.to_string());
        Some(project)
    }

    /// Returns false if the name was already present
    pub fn put_label(&mut self, kind: LabelKind, name: &str) -> bool {
        let inserted = self.labels_mut(kind).insert(name.to_string());
        if inserted {
            self.mark_labels_dirty(kind);
        }
        inserted
    }

    /// Returns false if the name was absent
    pub fn remove_label(&mut self, kind: LabelKind, name: &str) -> bool {
        let removed = self.labels_mut(kind).remove(name);
        if removed {
            self.mark_labels_dirty(kind);
        }
        removed
    }

    pub fn has_changes(&self) -> bool {
        !self.dirty_projects.is_empty()
            || !self.removed_projects.is_empty()
            || self.dirty_categories
            || self.dirty_tags
    }

    /// Drain the recorded writes into a changeset
    pub fn take_changes(&mut self) -> Changeset {
        let dirty = std::mem::take(&mut self.dirty_projects);
        let upserted_projects = dirty
            .iter()
            .filter_map(|id| self.get_project(id).cloned())
            .collect();

        let mut changes = Changeset {
            upserted_projects,
            removed_projects: std::mem::take(&mut self.removed_projects),
            categories: None,
            tags: None,
        };

        if std::mem::take(&mut self.dirty_categories) {
            changes.set_labels(LabelKind::Category, self.categories.clone());
        }
        if std::mem::take(&mut self.dirty_tags) {
            changes.set_labels(LabelKind::Tag, self.tags.clone());
        }

        changes
    }
}
