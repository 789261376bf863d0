use axum::{
    routing::{get, put},
    Extension, Router,
};
use folio_core::LabelKind;

use crate::state::CatalogState;

pub mod extract;
pub mod handlers;
pub mod labels_handlers;
pub mod response;
pub mod showcase_handlers;

/// Creates the projects API router
pub fn create_projects_router() -> Router<CatalogState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/{id}",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
}

/// Creates the router for one label collection (categories or tags)
pub fn create_labels_router(kind: LabelKind) -> Router<CatalogState> {
    Router::new()
        .route(
            "/",
            get(labels_handlers::list_labels).post(labels_handlers::create_label),
        )
        .route(
            "/{name}",
            put(labels_handlers::rename_label).delete(labels_handlers::delete_label),
        )
        .route("/{name}/usage", get(labels_handlers::label_usage))
        .layer(Extension(kind))
}

/// Creates the public showcase router
pub fn create_showcase_router() -> Router<CatalogState> {
    Router::new()
        .route("/", get(showcase_handlers::get_showcase))
        .route(
            "/categories",
            get(showcase_handlers::list_showcase_categories),
        )
}

/// All catalog routes, to be nested under `/api`
pub fn create_catalog_router() -> Router<CatalogState> {
    Router::new()
        .nest("/projects", create_projects_router())
        .nest("/categories", create_labels_router(LabelKind::Category))
        .nest("/tags", create_labels_router(LabelKind::Tag))
        .nest("/showcase", create_showcase_router())
}
