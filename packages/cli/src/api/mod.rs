use axum::{routing::get, Router};
use folio_projects::{create_catalog_router, CatalogState};

pub mod health;

pub fn create_router(state: CatalogState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/status", get(health::status_check))
        .nest("/api", create_catalog_router())
        .with_state(state)
}
