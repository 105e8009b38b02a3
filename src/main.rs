//! partner-sandbox server entry point.
//!
//! Starts the Axum HTTP server with the emulated platform endpoints.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use partner_sandbox::api;
use partner_sandbox::app_state::AppState;
use partner_sandbox::config::{AppConfig, StorageBackend};
use partner_sandbox::service::{DeliveryHeroService, GetirService, TrendyolService};
use partner_sandbox::storage::{MemoryStore, PlatformStore, PostgresStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting partner-sandbox");

    // Build the storage backend
    let store: Arc<dyn PlatformStore> = match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("using in-memory storage with seeded fixtures");
            Arc::new(MemoryStore::seeded())
        }
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .min_connections(config.database_min_connections)
                .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
                .connect(&config.database_url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("using postgres storage");
            Arc::new(PostgresStore::new(pool))
        }
    };

    // Build service layer
    let deliveryhero = Arc::new(DeliveryHeroService::new(
        Arc::clone(&store),
        config.availability_ack_probability,
    ));
    let getir = Arc::new(GetirService::new(Arc::clone(&store)));
    let trendyol = Arc::new(TrendyolService::new(
        store,
        config.trendyol_api_key.clone(),
        config.trendyol_api_secret.clone(),
        config.status_conflict_probability,
    ));

    // Build application state
    let app_state = AppState {
        deliveryhero,
        getir,
        trendyol,
    };

    // Build router
    let app = api::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
