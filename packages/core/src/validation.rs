// ABOUTME: Input validation for projects and labels
// ABOUTME: Collects field-level errors before any mutation is attempted

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::types::{Embed, ProjectInput};

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn check_required(errors: &mut Vec<ValidationError>, field: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, format!("{} is required", label)));
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str, label: &str) {
    if Url::parse(value.trim()).is_err() {
        errors.push(ValidationError::new(
            field,
            format!("{} must be a valid URL", label),
        ));
    }
}

fn check_labels(
    errors: &mut Vec<ValidationError>,
    field: &str,
    labels: &[String],
    label: &str,
    require_one: bool,
) {
    if labels.is_empty() {
        if !require_one {
            return;
        }
        errors.push(ValidationError::new(
            field,
            format!("{} must contain at least one item", label),
        ));
        return;
    }

    if labels.iter().any(|name| name.trim().is_empty()) {
        errors.push(ValidationError::new(field, format!("{} cannot be empty", label)));
        return;
    }

    let mut seen = HashSet::new();
    if let Some(dup) = labels.iter().find(|name| !seen.insert(name.as_str())) {
        errors.push(ValidationError::new(
            field,
            format!("{} contains '{}' more than once", label, dup),
        ));
    }
}

/// Validates a project payload for create or full replace
pub fn validate_project_input(data: &ProjectInput) -> Vec<ValidationError> {
    validate_project_fields(data, true)
}

/// Validates a project already held by a catalog, as read from an import.
/// A label cascade may have left it with no categories or tags, which is
/// accepted; every other rule of `validate_project_input` applies.
pub fn validate_stored_project(data: &ProjectInput) -> Vec<ValidationError> {
    validate_project_fields(data, false)
}

fn validate_project_fields(data: &ProjectInput, require_labels: bool) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_required(&mut errors, "title", &data.title, "Title");
    check_required(&mut errors, "description", &data.description, "Description");

    check_url(&mut errors, "image", &data.image, "Image");
    check_url(&mut errors, "demoUrl", &data.demo_url, "Demo URL");
    check_url(&mut errors, "repoUrl", &data.repo_url, "Repository URL");

    match &data.embed {
        Embed::None => {}
        Embed::Stackblitz(url) => check_url(&mut errors, "embed", url, "Stackblitz URL"),
        Embed::Codepen(url) => check_url(&mut errors, "embed", url, "Codepen URL"),
    }

    check_labels(
        &mut errors,
        "categories",
        &data.categories,
        "Categories",
        require_labels,
    );
    check_labels(&mut errors, "tags", &data.tags, "Tags", require_labels);

    errors
}

/// Validates a category or tag name
pub fn validate_label_name(name: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_required(&mut errors, "name", name, "Name");
    errors
}

/// Truncates a string to a maximum length with ellipsis
pub fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
