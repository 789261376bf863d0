// ABOUTME: Core types, validation, and utilities for Folio
// ABOUTME: Foundational package shared by the storage, catalog, and CLI packages

pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{Embed, LabelKind, Project, ProjectInput};

// Re-export constants
pub use constants::{
    database_file, folio_dir, CATEGORIES_FILE, DATABASE_FILE, PROJECTS_FILE, TAGS_FILE,
};

// Re-export utilities
pub use utils::generate_project_id;

// Re-export validation
pub use validation::{
    truncate, validate_label_name, validate_project_input, validate_stored_project,
    ValidationError,
};
