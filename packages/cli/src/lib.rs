use axum::http::{HeaderValue, Method};
use axum::Router;
use folio_config::constants;
use folio_projects::CatalogState;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod api;
pub mod config;


use config::Config;

/// Install the global subscriber; `RUST_LOG` overrides `default_level`
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(constants::RUST_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (tests, embedded use) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Open the configured storage and load the catalog
pub async fn open_state(config: &Config) -> anyhow::Result<CatalogState> {
    let state = CatalogState::init(config.storage_config())
        .await?
        .with_page_size(config.page_size);
    Ok(state)
}

/// The full application: health, catalog API, CORS, and request tracing
pub fn create_app(state: CatalogState, cors_origin: &str) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(api::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = open_state(&config).await?;
    let app = create_app(state, &config.cors_origin)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    info!(
        "Folio server listening on {} (storage: {:?}, data: {})",
        addr,
        config.storage,
        config.data_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Folio server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
