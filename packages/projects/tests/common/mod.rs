// ABOUTME: Common test utilities for integration tests
// ABOUTME: Provides test server setup, catalog seeding, and HTTP client helpers

use axum::Router;
use folio_projects::{
    create_catalog_router, CatalogState, LabelKind, StorageConfig, StorageProvider,
};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Test context containing server URL and catalog state
pub struct TestContext {
    pub base_url: String,
    #[allow(dead_code)]
    pub state: CatalogState,
    pub _temp_dir: TempDir,
}

/// Start a server over a fresh SQLite catalog in a temp directory
pub async fn setup_test_server() -> TestContext {
    let temp_dir = TempDir::new().unwrap();

    let config = StorageConfig {
        enable_wal: false,
        ..StorageConfig::with_provider(StorageProvider::Sqlite {
            path: temp_dir.path().join("folio.db"),
        })
    };
    let state = CatalogState::init(config)
        .await
        .expect("Failed to create catalog state");

    for name in ["Web App", "AI/ML", "Games"] {
        state
            .manager
            .add_label(LabelKind::Category, name)
            .await
            .unwrap();
    }
    for name in ["React", "Vue", "Rust"] {
        state.manager.add_label(LabelKind::Tag, name).await.unwrap();
    }

    let app = Router::new()
        .nest("/api", create_catalog_router())
        .with_state(state.clone());

    // Bind to random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/api", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestContext {
        base_url,
        state,
        _temp_dir: temp_dir,
    }
}

/// A valid project payload
pub fn project_json(title: &str, categories: &[&str], tags: &[&str]) -> Value {
    json!({
        "title": title,
        "description": format!("About {}", title),
        "image": "https://example.com/image.png",
        "demoUrl": "https://example.com/demo",
        "repoUrl": "https://github.com/example/repo",
        "categories": categories,
        "tags": tags
    })
}

/// Create a project and return its id
#[allow(dead_code)]
pub async fn create_project(base_url: &str, body: &Value) -> String {
    let response = post_json(base_url, "/projects", body).await;
    assert_eq!(response.status(), 201, "project creation failed");
    let body: Value = response.json().await.unwrap();
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Helper to make GET requests
pub async fn get(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make POST requests with JSON body
#[allow(dead_code)]
pub async fn post_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .post(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make PUT requests with JSON body
#[allow(dead_code)]
pub async fn put_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .put(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make PUT request")
}

/// Helper to make DELETE requests
#[allow(dead_code)]
pub async fn delete(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .delete(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make DELETE request")
}
