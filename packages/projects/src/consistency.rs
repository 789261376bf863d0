// ABOUTME: Label uniqueness and cascade rules for categories and tags
// ABOUTME: Renames and deletes rewrite every referencing project in the same batch

use chrono::Utc;
use folio_core::{validate_label_name, LabelKind, Project};
use serde::Serialize;
use tracing::{debug, warn};

use crate::manager::{ManagerError, ManagerResult};
use crate::store::Catalog;

/// Outcome of a rename or delete cascade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub kind: LabelKind,
    pub label: String,
    /// Set when the label was renamed rather than deleted
    pub renamed_to: Option<String>,
    /// Referencing projects counted before the cascade ran
    pub usage_count: usize,
    /// Ids of the projects the cascade rewrote
    pub affected_projects: Vec<String>,
    /// Ids of projects now holding no label of this kind
    pub emptied_projects: Vec<String>,
}

/// A label with its current reference count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelUsage {
    pub name: String,
    pub usage_count: usize,
}

/// Number of projects whose label set of `kind` contains `name`
pub fn usage_count(projects: &[Project], kind: LabelKind, name: &str) -> usize {
    projects.iter().filter(|p| p.has_label(kind, name)).count()
}

/// Every label of `kind` with its usage, in sorted order
pub fn label_usage(catalog: &Catalog, kind: LabelKind) -> Vec<LabelUsage> {
    catalog
        .list_labels(kind)
        .iter()
        .map(|name| LabelUsage {
            name: name.clone(),
            usage_count: usage_count(catalog.list_projects(), kind, name),
        })
        .collect()
}

pub fn add_label(catalog: &mut Catalog, kind: LabelKind, name: &str) -> ManagerResult<()> {
    let errors = validate_label_name(name);
    if !errors.is_empty() {
        return Err(ManagerError::Validation(errors));
    }

    if !catalog.put_label(kind, name) {
        return Err(ManagerError::DuplicateName {
            kind,
            name: name.to_string(),
        });
    }

    debug!("Added {} '{}'", kind, name);
    Ok(())
}

/// Rename a label and rewrite it in every referencing project.
///
/// Renaming a label to itself succeeds without recording any write.
pub fn rename_label(
    catalog: &mut Catalog,
    kind: LabelKind,
    old_name: &str,
    new_name: &str,
) -> ManagerResult<CascadeReport> {
    let mut report = CascadeReport {
        kind,
        label: old_name.to_string(),
        renamed_to: Some(new_name.to_string()),
        usage_count: 0,
        affected_projects: Vec::new(),
        emptied_projects: Vec::new(),
    };

    if old_name == new_name {
        report.usage_count = usage_count(catalog.list_projects(), kind, old_name);
        return Ok(report);
    }

    let errors = validate_label_name(new_name);
    if !errors.is_empty() {
        return Err(ManagerError::Validation(errors));
    }
    if !catalog.contains_label(kind, old_name) {
        return Err(ManagerError::label_not_found(kind, old_name));
    }
    if catalog.contains_label(kind, new_name) {
        return Err(ManagerError::DuplicateName {
            kind,
            name: new_name.to_string(),
        });
    }

    catalog.remove_label(kind, old_name);
    catalog.put_label(kind, new_name);

    let now = Utc::now();
    let referencing: Vec<Project> = catalog
        .list_projects()
        .iter()
        .filter(|p| p.has_label(kind, old_name))
        .cloned()
        .collect();
    report.usage_count = referencing.len();

    for mut project in referencing {
        let already_has_new = project.has_label(kind, new_name);
        let labels = project.labels_mut(kind);
        // Only reachable when the project references a label missing from
        // the collection; merging is the one case where the set shrinks.
        if already_has_new {
            labels.retain(|label| label != old_name);
        } else {
            for label in labels.iter_mut().filter(|label| label.as_str() == old_name) {
                *label = new_name.to_string();
            }
        }
        project.updated_at = now;
        report.affected_projects.push(project.id.clone());
        catalog.put_project(project);
    }

    debug!(
        "Renamed {} '{}' to '{}' across {} project(s)",
        kind,
        old_name,
        new_name,
        report.affected_projects.len()
    );
    Ok(report)
}

/// Delete a label and strip it from every referencing project.
///
/// Projects may be left without any label of this kind; they are reported
/// in `emptied_projects` rather than blocking the delete.
pub fn delete_label(
    catalog: &mut Catalog,
    kind: LabelKind,
    name: &str,
) -> ManagerResult<CascadeReport> {
    if !catalog.contains_label(kind, name) {
        return Err(ManagerError::label_not_found(kind, name));
    }

    let referencing: Vec<Project> = catalog
        .list_projects()
        .iter()
        .filter(|p| p.has_label(kind, name))
        .cloned()
        .collect();

    let mut report = CascadeReport {
        kind,
        label: name.to_string(),
        renamed_to: None,
        usage_count: referencing.len(),
        affected_projects: Vec::new(),
        emptied_projects: Vec::new(),
    };

    catalog.remove_label(kind, name);

    let now = Utc::now();
    for mut project in referencing {
        project.labels_mut(kind).retain(|label| label != name);
        project.updated_at = now;

        if project.labels(kind).is_empty() {
            warn!(
                "Project '{}' ({}) has no {} left after deleting '{}'",
                project.title,
                project.id,
                kind.collection(),
                name
            );
            report.emptied_projects.push(project.id.clone());
        }

        report.affected_projects.push(project.id.clone());
        catalog.put_project(project);
    }

    debug!(
        "Deleted {} '{}' from {} project(s)",
        kind,
        name,
        report.affected_projects.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::project;
    use pretty_assertions::assert_eq;

    fn catalog_with(projects: Vec<Project>, categories: &[&str], tags: &[&str]) -> Catalog {
        let mut catalog = Catalog::new();
        for project in projects {
            catalog.put_project(project);
        }
        for name in categories {
            catalog.put_label(LabelKind::Category, name);
        }
        for name in tags {
            catalog.put_label(LabelKind::Tag, name);
        }
        catalog.take_changes();
        catalog
    }

    fn names(catalog: &Catalog, kind: LabelKind) -> Vec<String> {
        catalog.list_labels(kind).iter().cloned().collect()
    }

    #[test]
    fn test_add_label_sorted_and_unique() {
        let mut catalog = Catalog::new();
        add_label(&mut catalog, LabelKind::Tag, "Vue").unwrap();
        add_label(&mut catalog, LabelKind::Tag, "React").unwrap();
        add_label(&mut catalog, LabelKind::Tag, "react").unwrap();

        let result = add_label(&mut catalog, LabelKind::Tag, "React");
        assert!(matches!(result, Err(ManagerError::DuplicateName { .. })));
        assert_eq!(names(&catalog, LabelKind::Tag), vec!["React", "Vue", "react"]);
    }

    #[test]
    fn test_add_blank_label_is_invalid() {
        let mut catalog = Catalog::new();
        let result = add_label(&mut catalog, LabelKind::Category, "   ");
        assert!(matches!(result, Err(ManagerError::Validation(_))));
        assert!(!catalog.has_changes());
    }

    #[test]
    fn test_rename_category_cascades() {
        let mut catalog = catalog_with(
            vec![project("p1", "Site", &["Web App"], &["React"])],
            &["Web App", "AI/ML"],
            &["React"],
        );

        let report = rename_label(&mut catalog, LabelKind::Category, "Web App", "Webapp").unwrap();

        assert_eq!(names(&catalog, LabelKind::Category), vec!["AI/ML", "Webapp"]);
        let p1 = catalog.get_project("p1").unwrap();
        assert_eq!(p1.categories, vec!["Webapp"]);
        assert!(p1.updated_at > p1.created_at);
        assert_eq!(report.usage_count, 1);
        assert_eq!(report.affected_projects, vec!["p1"]);
    }

    #[test]
    fn test_rename_preserves_other_labels_and_cardinality() {
        let mut catalog = catalog_with(
            vec![
                project("p1", "One", &["Web"], &["React", "CSS", "Vite"]),
                project("p2", "Two", &["Web"], &["Go"]),
            ],
            &["Web"],
            &["CSS", "Go", "React", "Vite"],
        );

        rename_label(&mut catalog, LabelKind::Tag, "CSS", "Tailwind").unwrap();

        let p1 = catalog.get_project("p1").unwrap();
        assert_eq!(p1.tags, vec!["React", "Tailwind", "Vite"]);
        assert_eq!(catalog.get_project("p2").unwrap().tags, vec!["Go"]);

        let changes = catalog.take_changes();
        assert_eq!(changes.upserted_projects.len(), 1);
        assert!(changes.tags.is_some());
        assert!(changes.categories.is_none());
    }

    #[test]
    fn test_rename_to_same_name_changes_nothing() {
        let mut catalog = catalog_with(
            vec![project("p1", "Site", &["Web App"], &["React"])],
            &["Web App"],
            &["React"],
        );
        let before = catalog.to_snapshot();

        let report = rename_label(&mut catalog, LabelKind::Category, "Web App", "Web App").unwrap();

        assert_eq!(report.usage_count, 1);
        assert!(report.affected_projects.is_empty());
        assert!(!catalog.has_changes());
        assert_eq!(catalog.to_snapshot(), before);
    }

    #[test]
    fn test_rename_rejects_collision_and_missing() {
        let mut catalog = catalog_with(Vec::new(), &["Web", "Mobile"], &[]);

        let collision = rename_label(&mut catalog, LabelKind::Category, "Web", "Mobile");
        assert!(matches!(collision, Err(ManagerError::DuplicateName { .. })));

        let missing = rename_label(&mut catalog, LabelKind::Category, "Games", "Play");
        assert!(matches!(missing, Err(ManagerError::NotFound(_))));

        let blank = rename_label(&mut catalog, LabelKind::Category, "Web", "");
        assert!(matches!(blank, Err(ManagerError::Validation(_))));

        assert!(!catalog.has_changes());
        assert_eq!(names(&catalog, LabelKind::Category), vec!["Mobile", "Web"]);
    }

    #[test]
    fn test_rename_merges_when_project_already_holds_new_name() {
        let mut catalog = catalog_with(
            vec![project("p1", "Site", &["Web"], &["JS", "TS"])],
            &["Web"],
            &["JS"],
        );

        rename_label(&mut catalog, LabelKind::Tag, "JS", "TS").unwrap();
        assert_eq!(catalog.get_project("p1").unwrap().tags, vec!["TS"]);
    }

    #[test]
    fn test_delete_unused_tag() {
        let mut catalog = catalog_with(
            vec![project("p1", "Site", &["Web"], &["React"])],
            &["Web"],
            &["React", "Vue"],
        );

        assert_eq!(usage_count(catalog.list_projects(), LabelKind::Tag, "Vue"), 0);
        let report = delete_label(&mut catalog, LabelKind::Tag, "Vue").unwrap();

        assert_eq!(report.usage_count, 0);
        assert!(report.affected_projects.is_empty());
        assert_eq!(names(&catalog, LabelKind::Tag), vec!["React"]);
    }

    #[test]
    fn test_delete_strips_from_every_project() {
        let mut catalog = catalog_with(
            vec![
                project("p1", "One", &["Web"], &["React", "CSS"]),
                project("p2", "Two", &["Web"], &["React"]),
                project("p3", "Three", &["Web"], &["Go"]),
            ],
            &["Web"],
            &["CSS", "Go", "React"],
        );

        assert_eq!(usage_count(catalog.list_projects(), LabelKind::Tag, "React"), 2);
        let report = delete_label(&mut catalog, LabelKind::Tag, "React").unwrap();

        assert_eq!(report.usage_count, 2);
        assert_eq!(report.affected_projects, vec!["p1", "p2"]);
        assert_eq!(report.emptied_projects, vec!["p2"]);
        assert_eq!(catalog.get_project("p1").unwrap().tags, vec!["CSS"]);
        assert!(catalog.get_project("p2").unwrap().tags.is_empty());
        assert_eq!(catalog.get_project("p3").unwrap().tags, vec!["Go"]);
    }

    #[test]
    fn test_delete_missing_label() {
        let mut catalog = Catalog::new();
        let result = delete_label(&mut catalog, LabelKind::Category, "Ghost");
        assert!(matches!(result, Err(ManagerError::NotFound(_))));
    }

    #[test]
    fn test_label_usage_listing() {
        let catalog = catalog_with(
            vec![
                project("p1", "One", &["Web", "Games"], &["Rust"]),
                project("p2", "Two", &["Web"], &["Rust"]),
            ],
            &["Web", "Games", "Mobile"],
            &["Rust"],
        );

        let usage = label_usage(&catalog, LabelKind::Category);
        let counts: Vec<_> = usage.iter().map(|u| (u.name.as_str(), u.usage_count)).collect();
        assert_eq!(counts, vec![("Games", 1), ("Mobile", 0), ("Web", 2)]);
    }
}
