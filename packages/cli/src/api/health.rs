use axum::{extract::State, response::Result, Json};
use folio_projects::CatalogState;
use serde_json::{json, Value};

pub async fn health_check() -> Result<Json<Value>> {
    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "folio-cli"
    })))
}

/// Health plus catalog counts; reports the storage as unreachable instead of failing
pub async fn status_check(State(state): State<CatalogState>) -> Result<Json<Value>> {
    let storage_manager = state.manager.storage_manager();
    let storage = match storage_manager.get_stats().await {
        Ok(stats) => json!({ "connected": true, "stats": stats }),
        Err(e) => json!({ "connected": false, "error": e.to_string() }),
    };

    Ok(Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "service": "folio-cli",
        "pageSize": state.page_size,
        "storage": storage
    })))
}
