// ABOUTME: HTTP request handlers for project operations
// ABOUTME: CRUD over projects with full-record replace on update

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use folio_core::ProjectInput;
use serde::Deserialize;
use tracing::{error, info};

use super::extract::{ApiJson, ApiQuery};
use super::response::ok;
use crate::state::CatalogState;

#[derive(Deserialize)]
pub struct ListProjectsQuery {
    pub search: Option<String>,
}

/// List all projects, optionally filtered by an admin search term
pub async fn list_projects(
    State(state): State<CatalogState>,
    ApiQuery(params): ApiQuery<ListProjectsQuery>,
) -> impl IntoResponse {
    let projects = match params.search.as_deref() {
        Some(term) => {
            info!("Searching projects for '{}'", term);
            state.manager.search_projects(term).await
        }
        None => {
            info!("Listing all projects");
            state.manager.list_projects().await
        }
    };

    ok(StatusCode::OK, projects)
}

/// Get a specific project by ID
pub async fn get_project(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Getting project with ID: {}", id);

    match state.manager.get_project(&id).await {
        Ok(project) => ok(StatusCode::OK, project),
        Err(e) => e.into_response(),
    }
}

/// Create a new project
pub async fn create_project(
    State(state): State<CatalogState>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> impl IntoResponse {
    info!("Creating project: {}", input.title);

    match state.manager.create_project(input).await {
        Ok(project) => ok(StatusCode::CREATED, project),
        Err(e) => {
            error!("Failed to create project: {}", e);
            e.into_response()
        }
    }
}

/// Replace an existing project
pub async fn update_project(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> impl IntoResponse {
    info!("Updating project: {}", id);

    match state.manager.update_project(&id, input).await {
        Ok(project) => ok(StatusCode::OK, project),
        Err(e) => {
            error!("Failed to update project {}: {}", id, e);
            e.into_response()
        }
    }
}

/// Delete a project
pub async fn delete_project(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting project: {}", id);

    match state.manager.delete_project(&id).await {
        Ok(project) => ok(StatusCode::OK, project),
        Err(e) => {
            error!("Failed to delete project {}: {}", id, e);
            e.into_response()
        }
    }
}
