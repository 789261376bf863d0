//! # Folio Projects
//!
//! The portfolio catalog engine: an entity store for projects, categories
//! and tags, the rules that keep labels consistent across projects, and the
//! showcase query engine, exposed through a manager and axum routers.

pub mod api;
pub mod consistency;
pub mod manager;
pub mod pagination;
pub mod query;
pub mod state;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main types from core
pub use folio_core::{Embed, LabelKind, Project, ProjectInput, ValidationError};

// Re-export manager types
pub use manager::{CatalogManager, ImportSummary, ManagerError, ManagerResult};

// Re-export engine types
pub use consistency::{CascadeReport, LabelUsage};
pub use pagination::{PageMeta, PageParams, DEFAULT_PAGE_SIZE};
pub use query::{
    available_categories, filter, interleave, search_labels, search_projects, showcase, Feed,
    FilterResult, LoadTicket, ShowcasePage, ShowcaseQuery, ShowcaseSource,
};
pub use store::Catalog;

// Re-export storage types
pub use folio_storage::{
    CatalogSnapshot, CatalogStorage, StorageConfig, StorageError, StorageFactory, StorageManager,
    StorageProvider, StorageStats,
};

// Re-export shared state and routers
pub use api::{
    create_catalog_router, create_labels_router, create_projects_router, create_showcase_router,
};
pub use state::CatalogState;
