use facet_search::{
    api::{build_router, AppState},
    catalog::{default_catalog, CatalogHandle, FilterCatalog},
    config::Config,
    search::SearchService,
    store::{load_seed, IdentityDirectory, InMemoryDirectory, InMemoryItemStore, ItemStore},
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "facet_search={},tower_http=info",
            config.observability.log_level
        )
        .into()
    });
    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        service = %config.observability.service_name,
        "Starting Facet Search v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Initialize Prometheus metrics
    if config.observability.prometheus_enabled {
        if let Err(e) = facet_search::metrics::init_metrics() {
            tracing::warn!("Failed to initialize metrics: {}", e);
            tracing::warn!("Continuing without metrics");
        } else {
            tracing::info!("Prometheus metrics initialized");
        }
    } else {
        tracing::info!("Prometheus metrics disabled in configuration");
    }

    // Filter catalog
    let catalog = match &config.search.catalog_path {
        Some(path) => FilterCatalog::from_yaml_file(path)?,
        None => {
            tracing::info!("No catalog_path configured, using built-in filter catalog");
            default_catalog()
        }
    };
    tracing::info!(definitions = catalog.len(), "Filter catalog ready");
    let catalog = CatalogHandle::new(catalog);

    // In-memory collaborators
    let (store, directory) = match &config.search.seed_path {
        Some(path) => load_seed(path)?,
        None => {
            tracing::warn!("No seed_path configured, starting with an empty item store");
            (InMemoryItemStore::new(), InMemoryDirectory::new())
        }
    };
    tracing::info!(items = store.len(), users = directory.user_count(), "Item store ready");

    let store: Arc<dyn ItemStore> = Arc::new(store);
    let directory: Arc<dyn IdentityDirectory> = Arc::new(directory);

    let search = SearchService::new(catalog, store, directory.clone(), config.search.clone());
    let app_state =
        AppState::new(search, directory).with_metrics(config.observability.prometheus_enabled);

    let app = build_router(
        app_state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    // Start HTTP server
    let http_addr = config.http_addr();
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Health check: http://{}/health", http_addr);
    tracing::info!("   Search API: http://{}/v1/search", http_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(http_listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Shutting down gracefully...");
    Ok(())
}
