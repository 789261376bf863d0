// ABOUTME: HTTP request handlers for category and tag operations
// ABOUTME: One handler set serves both collections; the router supplies the kind

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use folio_core::LabelKind;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::extract::{ApiJson, ApiQuery};
use super::response::ok;
use crate::state::CatalogState;

#[derive(Deserialize)]
pub struct ListLabelsQuery {
    pub search: Option<String>,
}

/// Request body for adding or renaming a label
#[derive(Deserialize)]
pub struct LabelRequest {
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub name: String,
    pub usage_count: usize,
}

/// List labels with usage counts
pub async fn list_labels(
    State(state): State<CatalogState>,
    Extension(kind): Extension<LabelKind>,
    ApiQuery(params): ApiQuery<ListLabelsQuery>,
) -> impl IntoResponse {
    info!("Listing {}", kind.collection());

    let labels = state
        .manager
        .label_usage(kind, params.search.as_deref())
        .await;
    ok(StatusCode::OK, labels)
}

/// Add a label
pub async fn create_label(
    State(state): State<CatalogState>,
    Extension(kind): Extension<LabelKind>,
    ApiJson(request): ApiJson<LabelRequest>,
) -> impl IntoResponse {
    info!("Creating {}: {}", kind, request.name);

    match state.manager.add_label(kind, &request.name).await {
        Ok(()) => ok(
            StatusCode::CREATED,
            UsageResponse {
                name: request.name,
                usage_count: 0,
            },
        ),
        Err(e) => {
            error!("Failed to create {} '{}': {}", kind, request.name, e);
            e.into_response()
        }
    }
}

/// Rename a label, rewriting it in every project
pub async fn rename_label(
    State(state): State<CatalogState>,
    Extension(kind): Extension<LabelKind>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<LabelRequest>,
) -> impl IntoResponse {
    info!("Renaming {} '{}' to '{}'", kind, name, request.name);

    match state.manager.rename_label(kind, &name, &request.name).await {
        Ok(report) => ok(StatusCode::OK, report),
        Err(e) => {
            error!("Failed to rename {} '{}': {}", kind, name, e);
            e.into_response()
        }
    }
}

/// Delete a label, stripping it from every project
pub async fn delete_label(
    State(state): State<CatalogState>,
    Extension(kind): Extension<LabelKind>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    info!("Deleting {}: {}", kind, name);

    match state.manager.delete_label(kind, &name).await {
        Ok(report) => ok(StatusCode::OK, report),
        Err(e) => {
            error!("Failed to delete {} '{}': {}", kind, name, e);
            e.into_response()
        }
    }
}

/// Number of projects referencing a label
pub async fn label_usage(
    State(state): State<CatalogState>,
    Extension(kind): Extension<LabelKind>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.manager.usage_count(kind, &name).await {
        Ok(usage_count) => ok(StatusCode::OK, UsageResponse { name, usage_count }),
        Err(e) => e.into_response(),
    }
}
